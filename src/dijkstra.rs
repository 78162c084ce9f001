//! Dijkstra shortest jump routes over a [`ProximityGraph`].
//!
//! The queue is seeded with every vertex (source at 0, the rest at +inf) and
//! vertices are re-enqueued on each strict improvement. Entries for vertices
//! that were already settled, or that no edge has reached yet, are skipped
//! when they surface. Reachability is tracked with its own flag rather than
//! read off the distance, so a route whose total overflows to +inf is still
//! found.
//!
//! Tie-breaking: an update requires a strictly shorter distance, so the first
//! predecessor to reach the minimum is kept. Which of several equally short
//! routes is returned depends on vertex order and heap ties and is not
//! otherwise specified.

use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;

use crate::error::Result;
use crate::graph::ProximityGraph;
use crate::heap::{HeapStats, MinHeap};

/// Work counters of one search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub relaxations: u64, // successful distance improvements
    pub settled: u32,     // vertices finalized
    pub heap: HeapStats,
}

/// A route from source to target inclusive.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JumpPath<K> {
    pub stops: Vec<K>,
    /// `segments[i]` is the distance from `stops[i]` to `stops[i + 1]`.
    pub segments: Vec<f64>,
    pub total: f64,
}

impl<K> JumpPath<K> {
    #[inline] pub fn jump_count(&self) -> usize { self.segments.len() }
    #[inline] pub fn source(&self) -> Option<&K> { self.stops.first() }
    #[inline] pub fn target(&self) -> Option<&K> { self.stops.last() }

    /// Longest single hop, 0 for a route that never leaves the source.
    pub fn longest_jump(&self) -> f64 { self.segments.iter().copied().fold(0.0, f64::max) }
}

/// Result of a valid route query. Unreachable is an expected outcome, not an error.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome<K> {
    Found(JumpPath<K>),
    Unreachable,
}

impl<K> PathOutcome<K> {
    #[inline] pub fn is_reachable(&self) -> bool { matches!(self, PathOutcome::Found(_)) }

    pub fn path(&self) -> Option<&JumpPath<K>> {
        match self { PathOutcome::Found(p) => Some(p), PathOutcome::Unreachable => None }
    }

    pub fn into_path(self) -> Option<JumpPath<K>> {
        match self { PathOutcome::Found(p) => Some(p), PathOutcome::Unreachable => None }
    }

    pub fn total(&self) -> Option<f64> { self.path().map(|p| p.total) }
}

/// Distances and predecessors from one source, indexed by vertex.
#[derive(Clone, Debug)]
pub struct ShortestPathTree {
    source: u32,
    dist: Vec<f64>,
    via: Vec<Option<(u32, f64)>>, // (predecessor, hop weight)
    reached: Vec<bool>,
}

impl ShortestPathTree {
    #[inline] pub fn source(&self) -> u32 { self.source }
    #[inline] pub fn distance(&self, v: u32) -> f64 { self.dist[v as usize] }
    #[inline] pub fn is_reachable(&self, v: u32) -> bool { self.reached[v as usize] }
    #[inline] pub fn predecessor(&self, v: u32) -> Option<u32> { self.via[v as usize].map(|(p, _)| p) }
    #[inline] pub fn distances(&self) -> &[f64] { &self.dist }

    /// Vertex indices and hop weights from the source to `v`, if reachable.
    pub fn path_to(&self, v: u32) -> Option<(Vec<u32>, Vec<f64>)> {
        if !self.is_reachable(v) { return None; }
        let mut stops = vec![v];
        let mut hops = Vec::new();
        let mut cur = v;
        while let Some((p, w)) = self.via[cur as usize] {
            stops.push(p); hops.push(w); cur = p;
        }
        stops.reverse(); hops.reverse();
        Some((stops, hops))
    }
}

fn search<K>(g: &ProximityGraph<K>, source: u32, target: Option<u32>) -> (ShortestPathTree, SearchStats) {
    let n = g.vertex_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut via: Vec<Option<(u32, f64)>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut reached = vec![false; n];
    dist[source as usize] = 0.0;
    reached[source as usize] = true;

    let mut heap = MinHeap::with_capacity(n);
    for v in 0..n as u32 { heap.enqueue(v, dist[v as usize]); }

    let mut relaxations: u64 = 0;
    let mut settled_count: u32 = 0;
    while let Some((u, d)) = heap.dequeue() {
        let ui = u as usize;
        // Seed entries of vertices no edge has reached carry no route.
        if settled[ui] || !reached[ui] || d > dist[ui] { continue; }
        settled[ui] = true; settled_count += 1;
        if target == Some(u) { break; }
        for (v, w) in g.neighbors(u) {
            let vi = v as usize;
            if settled[vi] { continue; }
            let nd = d + w;
            if !reached[vi] || nd < dist[vi] {
                reached[vi] = true;
                dist[vi] = nd;
                via[vi] = Some((u, w));
                heap.enqueue(v, nd);
                relaxations += 1;
            }
        }
    }

    let stats = SearchStats { relaxations, settled: settled_count, heap: heap.stats() };
    log::trace!("dijkstra from {}: {:?}", source, stats);
    (ShortestPathTree { source, dist, via, reached }, stats)
}

/// Distances from `source` to every vertex.
pub fn shortest_path_tree<K>(g: &ProximityGraph<K>, source: &K) -> Result<ShortestPathTree>
where K: Clone + Eq + Hash + Display {
    let s = g.require(source)?;
    Ok(search(g, s, None).0)
}

/// Shortest route between two systems. Fails with `UnknownSystem` if either
/// identifier is not a vertex of `g`.
pub fn shortest_path<K>(g: &ProximityGraph<K>, source: &K, target: &K) -> Result<PathOutcome<K>>
where K: Clone + Eq + Hash + Display {
    shortest_path_with_stats(g, source, target).map(|(outcome, _)| outcome)
}

pub fn shortest_path_with_stats<K>(g: &ProximityGraph<K>, source: &K, target: &K) -> Result<(PathOutcome<K>, SearchStats)>
where K: Clone + Eq + Hash + Display {
    let s = g.require(source)?;
    let t = g.require(target)?;
    let (tree, stats) = search(g, s, Some(t));
    let outcome = match tree.path_to(t) {
        Some((stops, segments)) => {
            let total = segments.iter().sum();
            PathOutcome::Found(JumpPath { stops: stops.into_iter().map(|v| g.id(v).clone()).collect(), segments, total })
        }
        None => PathOutcome::Unreachable,
    };
    match outcome.path() {
        Some(p) => log::debug!("route {} -> {}: {} jumps, {:.3} total", source, target, p.jump_count(), p.total),
        None => log::debug!("route {} -> {}: unreachable within range {}", source, target, g.threshold()),
    }
    Ok((outcome, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;

    fn chain() -> ProximityGraph<String> {
        let pts: Vec<(String, [f64; 3])> = (0..5).map(|i| (format!("S{i}"), [i as f64, 0.0, 0.0])).collect();
        ProximityGraph::build(&pts, 1.0).unwrap()
    }

    #[test]
    fn tree_covers_chain() {
        let g = chain();
        let tree = shortest_path_tree(&g, &"S0".to_string()).unwrap();
        assert_eq!(tree.distances(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(tree.predecessor(0), None);
        assert_eq!(tree.predecessor(3), Some(2));
        let (stops, hops) = tree.path_to(4).unwrap();
        assert_eq!(stops, vec![0, 1, 2, 3, 4]);
        assert_eq!(hops, vec![1.0; 4]);
    }

    #[test]
    fn early_exit_settles_less() {
        let g = chain();
        let (_, near) = shortest_path_with_stats(&g, &"S0".to_string(), &"S1".to_string()).unwrap();
        let (_, far) = shortest_path_with_stats(&g, &"S0".to_string(), &"S4".to_string()).unwrap();
        assert_eq!(near.settled, 2);
        assert_eq!(far.settled, 5);
        assert!(far.heap.max_size >= 5);
    }

    #[test]
    fn unknown_target_is_an_error() {
        let g = chain();
        let r = shortest_path(&g, &"S0".to_string(), &"Nowhere".to_string());
        assert!(matches!(r, Err(NavError::UnknownSystem(name)) if name == "Nowhere"));
    }

    #[test]
    fn overflowing_total_is_still_a_route() {
        let pts = vec![("A".to_string(), [-1e308, 0.0, 0.0]), ("M".to_string(), [0.0; 3]), ("B".to_string(), [1e308, 0.0, 0.0])];
        let g = ProximityGraph::build(&pts, 1.5e308).unwrap();
        assert!(!g.has_edge(0, 2));
        let tree = shortest_path_tree(&g, &"A".to_string()).unwrap();
        assert!(tree.is_reachable(2));
        assert_eq!(tree.distance(2), f64::INFINITY);
        assert_eq!(tree.predecessor(2), Some(1));
        let path = shortest_path(&g, &"A".to_string(), &"B".to_string()).unwrap().into_path().expect("A and B are chained through M");
        assert_eq!(path.stops, ["A", "M", "B"]);
        assert_eq!(path.segments, [1e308, 1e308]);
        assert_eq!(path.total, f64::INFINITY);
    }

    #[test]
    fn unbounded_range_keeps_the_saturated_edge() {
        let pts = vec![("A".to_string(), [-1e308, 0.0, 0.0]), ("M".to_string(), [0.0; 3]), ("B".to_string(), [1e308, 0.0, 0.0])];
        let g = ProximityGraph::build(&pts, f64::INFINITY).unwrap();
        assert_eq!(g.edge_weight(0, 2), Some(f64::INFINITY));
        let outcome = shortest_path(&g, &"A".to_string(), &"B".to_string()).unwrap();
        assert!(outcome.is_reachable());
        assert_eq!(outcome.total(), Some(f64::INFINITY));
    }

    #[test]
    fn empty_path_has_no_endpoints() {
        let p: JumpPath<String> = JumpPath { stops: Vec::new(), segments: Vec::new(), total: 0.0 };
        assert_eq!(p.source(), None);
        assert_eq!(p.target(), None);
        assert_eq!(p.longest_jump(), 0.0);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let g = chain();
        let found = shortest_path(&g, &"S0".to_string(), &"S2".to_string()).unwrap();
        let v = serde_json::to_value(&found).unwrap();
        assert_eq!(v["status"], "found");
        assert_eq!(v["stops"], serde_json::json!(["S0", "S1", "S2"]));
        let v = serde_json::to_value(PathOutcome::<String>::Unreachable).unwrap();
        assert_eq!(v["status"], "unreachable");
    }
}
