//! Jump-range analysis: how much range is needed to get somewhere.
//!
//! The bottleneck range between two systems is the smallest threshold at
//! which a route exists, i.e. the minimum over all routes of the longest hop.

use std::fmt::Display;
use std::hash::Hash;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::graph::ProximityGraph;
use crate::heap::MinHeap;

/// Minimax variant of Dijkstra: the priority of a vertex is the longest hop on
/// the best route found to it so far.
fn bottleneck_search<K>(g: &ProximityGraph<K>, s: u32, t: u32) -> Option<f64> {
    let n = g.vertex_count();
    let mut best = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut reached = vec![false; n];
    best[s as usize] = 0.0;
    reached[s as usize] = true;
    let mut heap = MinHeap::with_capacity(n);
    heap.enqueue(s, 0.0);
    while let Some((u, b)) = heap.dequeue() {
        let ui = u as usize;
        if settled[ui] || b > best[ui] { continue; }
        settled[ui] = true;
        if u == t { return Some(b); }
        for (v, w) in g.neighbors(u) {
            let nb = b.max(w);
            let vi = v as usize;
            // A saturated +inf hop still counts as a connection.
            if !settled[vi] && (!reached[vi] || nb < best[vi]) { reached[vi] = true; best[vi] = nb; heap.enqueue(v, nb); }
        }
    }
    None
}

/// Smallest range, no larger than `g`'s own, that connects `source` and
/// `target`. `None` when they are not connected in `g` at all.
pub fn bottleneck_range<K>(g: &ProximityGraph<K>, source: &K, target: &K) -> Result<Option<f64>>
where K: Clone + Eq + Hash + Display {
    let s = g.require(source)?;
    let t = g.require(target)?;
    Ok(bottleneck_search(g, s, t))
}

/// Minimum jump range needed to travel between two catalog systems.
pub fn required_jump_range(catalog: &Catalog, source: &str, target: &str) -> Result<f64> {
    // The direct jump always qualifies, so the graph at that range is enough.
    let direct = catalog.distance(source, target)?;
    let g = catalog.build_graph(direct)?;
    let range = bottleneck_range(&g, &source.to_string(), &target.to_string())?.unwrap_or(direct);
    log::debug!("required range {} -> {}: {:.3} (direct {:.3})", source, target, range, direct);
    Ok(range)
}

/// Smallest range at which every system can reach every other one: the longest
/// edge of a minimum spanning tree (dense Prim). 0 for fewer than two systems.
pub fn absolute_min_jump_range(catalog: &Catalog) -> f64 {
    let n = catalog.len();
    if n < 2 { return 0.0; }
    let mut in_tree = vec![false; n];
    let mut link = vec![f64::INFINITY; n];
    link[0] = 0.0;
    let mut longest: f64 = 0.0;
    for _ in 0..n {
        let mut u = usize::MAX;
        for v in 0..n { if !in_tree[v] && (u == usize::MAX || link[v] < link[u]) { u = v; } }
        in_tree[u] = true;
        longest = longest.max(link[u]);
        for v in 0..n {
            if in_tree[v] { continue; }
            let d = catalog.distance_idx(u as u32, v as u32);
            if d < link[v] { link[v] = d; }
        }
    }
    longest
}

// Union-find root with path halving.
fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x { parent[x as usize] = parent[parent[x as usize] as usize]; x = parent[x as usize]; }
    x
}

/// Component label for every vertex; labels are the smallest vertex index of
/// each component.
pub fn connected_components<K>(g: &ProximityGraph<K>) -> Vec<u32> {
    let mut parent: Vec<u32> = (0..g.vertex_count() as u32).collect();
    for e in g.edges() {
        let (ra, rb) = (find(&mut parent, e.a), find(&mut parent, e.b));
        if ra != rb { parent[ra.max(rb) as usize] = ra.min(rb); }
    }
    (0..parent.len() as u32).map(|v| find(&mut parent, v)).collect()
}

/// Smallest range at which `g` would still be connected (Kruskal over its
/// sorted edges), or `None` if `g` is already disconnected.
pub fn connecting_range<K>(g: &ProximityGraph<K>) -> Option<f64> {
    let n = g.vertex_count();
    if n < 2 { return Some(0.0); }
    let mut parent: Vec<u32> = (0..n as u32).collect();
    let mut joined = 1usize;
    for e in g.edges() {
        let (ra, rb) = (find(&mut parent, e.a), find(&mut parent, e.b));
        if ra == rb { continue; }
        parent[ra.max(rb) as usize] = ra.min(rb);
        joined += 1;
        if joined == n { return Some(e.weight); }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StarSystem;

    fn row() -> Catalog {
        Catalog::new(vec![
            StarSystem::new("A", [0.0, 0.0, 0.0]),
            StarSystem::new("B", [2.0, 0.0, 0.0]),
            StarSystem::new("C", [5.0, 0.0, 0.0]),
            StarSystem::new("D", [20.0, 0.0, 0.0]),
        ]).unwrap()
    }

    #[test]
    fn required_range_is_the_longest_hop() {
        let c = row();
        assert_eq!(required_jump_range(&c, "A", "C").unwrap(), 3.0);
        assert_eq!(required_jump_range(&c, "A", "D").unwrap(), 15.0);
        assert_eq!(required_jump_range(&c, "B", "B").unwrap(), 0.0);
    }

    #[test]
    fn absolute_range_connects_everything() {
        let c = row();
        assert_eq!(absolute_min_jump_range(&c), 15.0);
        let g = c.build_graph(15.0).unwrap();
        assert_eq!(connecting_range(&g), Some(15.0));
        let g = c.build_graph(14.9).unwrap();
        assert_eq!(connecting_range(&g), None);
        assert_eq!(connected_components(&g), vec![0, 0, 0, 3]);
    }

    #[test]
    fn saturated_hop_still_connects() {
        let pts = vec![("W".to_string(), [-1e308, 0.0, 0.0]), ("E".to_string(), [1e308, 0.0, 0.0])];
        let g = ProximityGraph::build(&pts, f64::INFINITY).unwrap();
        assert_eq!(bottleneck_range(&g, &"W".to_string(), &"E".to_string()).unwrap(), Some(f64::INFINITY));

        let via = Catalog::new(vec![
            StarSystem::new("W", [-1e308, 0.0, 0.0]),
            StarSystem::new("M", [0.0, 0.0, 0.0]),
            StarSystem::new("E", [1e308, 0.0, 0.0]),
        ]).unwrap();
        assert_eq!(required_jump_range(&via, "W", "E").unwrap(), 1e308);
    }
}
