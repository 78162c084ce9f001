//! Array-backed binary min-heap keyed by a numeric priority.
//!
//! Ordering is only enforced by `sift_up` / `sift_down`. On a priority tie the
//! parent stays in place, and while sinking the left child wins a tie with the
//! right one. Equal priorities therefore come out in no guaranteed order.

use serde::Serialize;

/// Push/pop counters of a single heap, reported with search results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HeapStats { pub pushes: u64, pub pops: u64, pub max_size: u64 }

#[derive(Clone, Debug)]
struct Entry<T, P> { value: T, priority: P }

/// Binary min-heap. `dequeue` returns the entry with the smallest priority.
#[derive(Clone, Debug)]
pub struct MinHeap<T, P = f64> {
    data: Vec<Entry<T, P>>,
    stats: HeapStats,
}

impl<T, P: PartialOrd + Copy> Default for MinHeap<T, P> {
    fn default() -> Self { Self::new() }
}

impl<T, P: PartialOrd + Copy> MinHeap<T, P> {
    #[inline] pub fn new() -> Self { Self::with_capacity(0) }
    #[inline] pub fn with_capacity(cap: usize) -> Self { Self { data: Vec::with_capacity(cap), stats: HeapStats::default() } }

    #[inline] pub fn len(&self) -> usize { self.data.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.data.is_empty() }
    #[inline] pub fn stats(&self) -> HeapStats { self.stats }

    /// Smallest entry without removing it.
    pub fn peek(&self) -> Option<(&T, P)> { self.data.first().map(|e| (&e.value, e.priority)) }

    pub fn enqueue(&mut self, value: T, priority: P) {
        self.data.push(Entry { value, priority });
        self.stats.pushes += 1;
        if self.data.len() as u64 > self.stats.max_size { self.stats.max_size = self.data.len() as u64; }
        self.sift_up(self.data.len() - 1);
    }

    /// Removes the smallest entry; `None` when the heap is empty.
    pub fn dequeue(&mut self) -> Option<(T, P)> {
        let len = self.data.len();
        if len == 0 { return None; }
        self.data.swap(0, len - 1);
        let out = self.data.pop();
        self.stats.pops += 1;
        if !self.data.is_empty() { self.sift_down(0); }
        out.map(|e| (e.value, e.priority))
    }

    #[inline] fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[idx].priority < self.data[parent].priority { self.data.swap(idx, parent); idx = parent; } else { break; }
        }
    }

    #[inline] fn sift_down(&mut self, mut idx: usize) {
        let n = self.data.len();
        loop {
            let left = idx * 2 + 1;
            if left >= n { break; }
            let right = left + 1;
            let mut best = left;
            if right < n && self.data[right].priority < self.data[left].priority { best = right; }
            if self.data[best].priority < self.data[idx].priority { self.data.swap(idx, best); idx = best; } else { break; }
        }
    }
}
