//! Proximity graph: every pair of systems within jump range is an edge.
//!
//! Vertices get dense `u32` indices in input order. Adjacency is stored in
//! compressed sparse row form (`offsets`/`targets`/`weights`), each undirected
//! edge appearing once in both endpoints' rows. A graph is never patched; a
//! new range means a new graph.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;

use crate::error::{NavError, Result};
use crate::metric::{Euclidean, Metric, Position};

/// Undirected edge between vertex indices `a < b`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Edge { pub a: u32, pub b: u32, pub weight: f64 }

impl Edge {
    #[inline] pub fn contains(&self, v: u32) -> bool { self.a == v || self.b == v }
}

#[derive(Clone, Debug)]
pub struct ProximityGraph<K> {
    ids: Vec<K>,
    index: HashMap<K, u32>,
    threshold: f64,
    offsets: Vec<usize>, // len n+1
    targets: Vec<u32>,
    weights: Vec<f64>,
    edges: Vec<Edge>,    // ascending weight
}

impl<K: Clone + Eq + Hash + Display> ProximityGraph<K> {
    /// Builds the graph for 3D positions under the Euclidean metric.
    pub fn build(points: &[(K, Position)], threshold: f64) -> Result<Self> {
        if let Some((k, _)) = points.iter().find(|(_, p)| p.iter().any(|c| !c.is_finite())) {
            return Err(NavError::NonFinitePosition(k.to_string()));
        }
        Self::build_with_metric(points, threshold, Euclidean)
    }

    /// Builds the graph with an arbitrary metric. An edge joins two distinct
    /// vertices iff `metric.distance(a, b) <= threshold`.
    pub fn build_with_metric<P, M: Metric<P>>(points: &[(K, P)], threshold: f64, metric: M) -> Result<Self> {
        if threshold.is_nan() || threshold < 0.0 { return Err(NavError::InvalidThreshold(threshold)); }
        let n = points.len();
        if n > u32::MAX as usize { return Err(NavError::TooManyVertices(n)); }

        let mut index = HashMap::with_capacity(n);
        for (i, (k, _)) in points.iter().enumerate() {
            if index.insert(k.clone(), i as u32).is_some() { return Err(NavError::DuplicateSystem(k.to_string())); }
        }

        let mut adj: Vec<Vec<(u32, f64)>> = vec![Vec::new(); n];
        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                let d = metric.distance(&points[i].1, &points[j].1);
                if d.is_nan() || d < 0.0 {
                    return Err(NavError::InvalidDistance { a: points[i].0.to_string(), b: points[j].0.to_string(), distance: d });
                }
                if d > threshold { continue; }
                adj[i].push((j as u32, d));
                adj[j].push((i as u32, d));
                edges.push(Edge { a: i as u32, b: j as u32, weight: d });
            }
        }
        edges.sort_by(|x, y| x.weight.total_cmp(&y.weight));

        let mut offsets = Vec::with_capacity(n + 1); offsets.push(0);
        let mut targets = Vec::with_capacity(edges.len() * 2);
        let mut weights = Vec::with_capacity(edges.len() * 2);
        for list in &adj {
            for &(v, w) in list { targets.push(v); weights.push(w); }
            offsets.push(targets.len());
        }

        log::debug!("proximity graph: {} systems, {} jumps within range {}", n, edges.len(), threshold);
        Ok(Self { ids: points.iter().map(|(k, _)| k.clone()).collect(), index, threshold, offsets, targets, weights, edges })
    }

    pub fn index_of(&self, id: &K) -> Option<u32> { self.index.get(id).copied() }
    pub fn contains(&self, id: &K) -> bool { self.index.contains_key(id) }

    /// Index of `id`, or `UnknownSystem`.
    pub fn require(&self, id: &K) -> Result<u32> {
        self.index_of(id).ok_or_else(|| NavError::UnknownSystem(id.to_string()))
    }
}

impl<K> ProximityGraph<K> {
    #[inline] pub fn threshold(&self) -> f64 { self.threshold }
    #[inline] pub fn vertex_count(&self) -> usize { self.ids.len() }
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() }
    #[inline] pub fn ids(&self) -> &[K] { &self.ids }
    #[inline] pub fn id(&self, v: u32) -> &K { &self.ids[v as usize] }

    /// All edges, shortest first.
    #[inline] pub fn edges(&self) -> &[Edge] { &self.edges }

    /// `(neighbor, weight)` pairs of vertex `v`. Panics if `v` is out of range.
    pub fn neighbors(&self, v: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let (s, e) = (self.offsets[v as usize], self.offsets[v as usize + 1]);
        self.targets[s..e].iter().copied().zip(self.weights[s..e].iter().copied())
    }

    #[inline] pub fn degree(&self, v: u32) -> usize { self.offsets[v as usize + 1] - self.offsets[v as usize] }
    #[inline] pub fn is_isolated(&self, v: u32) -> bool { self.degree(v) == 0 }

    pub fn edge_weight(&self, a: u32, b: u32) -> Option<f64> {
        self.neighbors(a).find(|&(v, _)| v == b).map(|(_, w)| w)
    }

    #[inline] pub fn has_edge(&self, a: u32, b: u32) -> bool { self.edge_weight(a, b).is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, gap: f64) -> Vec<(String, Position)> {
        (0..n).map(|i| (format!("S{i}"), [i as f64 * gap, 0.0, 0.0])).collect()
    }

    #[test]
    fn csr_rows_are_symmetric() {
        let g = ProximityGraph::build(&line(4, 1.0), 1.0).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(1), 2);
        for e in g.edges() {
            assert_eq!(g.edge_weight(e.a, e.b), Some(e.weight));
            assert_eq!(g.edge_weight(e.b, e.a), Some(e.weight));
        }
        assert!(!g.has_edge(0, 0));
    }

    #[test]
    fn edges_are_sorted_by_weight() {
        let pts = vec![
            ("a".to_string(), [0.0, 0.0, 0.0]),
            ("b".to_string(), [3.0, 0.0, 0.0]),
            ("c".to_string(), [0.0, 1.0, 0.0]),
        ];
        let g = ProximityGraph::build(&pts, f64::INFINITY).unwrap();
        let w: Vec<f64> = g.edges().iter().map(|e| e.weight).collect();
        assert!(w.windows(2).all(|p| p[0] <= p[1]));
        assert_eq!(w[0], 1.0);
    }

    #[test]
    fn rejects_bad_metric_output() {
        let pts = vec![("a".to_string(), 0.0f64), ("b".to_string(), 1.0)];
        let r = ProximityGraph::build_with_metric(&pts, 1.0, |a: &f64, b: &f64| a - b);
        assert!(matches!(r, Err(NavError::InvalidDistance { .. })));
    }
}
