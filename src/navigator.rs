//! Catalog plus the proximity graph for the current jump range.
//!
//! The graph is an immutable snapshot behind an `Arc`. A range or catalog
//! change builds a complete new graph first and only then replaces the
//! snapshot, so readers holding an older `Arc` keep a consistent graph and a
//! failed rebuild leaves the previous one in place.

use std::sync::Arc;

use crate::analysis;
use crate::catalog::Catalog;
use crate::config::NavConfig;
use crate::dijkstra::{self, PathOutcome, SearchStats};
use crate::error::{NavError, Result};
use crate::graph::ProximityGraph;

pub type SystemGraph = ProximityGraph<String>;

#[derive(Clone, Debug)]
pub struct Navigator {
    catalog: Catalog,
    graph: Arc<SystemGraph>,
    default_route: Option<(String, String)>,
}

impl Navigator {
    pub fn new(catalog: Catalog, jump_range: f64) -> Result<Self> {
        let graph = Arc::new(catalog.build_graph(jump_range)?);
        Ok(Self { catalog, graph, default_route: None })
    }

    /// Uses `config.catalog` when set, otherwise `catalog`.
    pub fn from_config(config: &NavConfig, catalog: Option<Catalog>) -> Result<Self> {
        config.validate()?;
        let catalog = match (&config.catalog, catalog) {
            (Some(path), _) => Catalog::load(path)?,
            (None, Some(c)) => c,
            (None, None) => return Err(NavError::InvalidConfig("no catalog given".into())),
        };
        let mut nav = Self::new(catalog, config.jump_range)?;
        if let (Some(o), Some(d)) = (&config.origin, &config.destination) {
            nav.catalog.require(o)?;
            nav.catalog.require(d)?;
            nav.default_route = Some((o.clone(), d.clone()));
        }
        Ok(nav)
    }

    #[inline] pub fn catalog(&self) -> &Catalog { &self.catalog }
    #[inline] pub fn jump_range(&self) -> f64 { self.graph.threshold() }

    /// Current graph; stays valid after later rebuilds.
    #[inline] pub fn snapshot(&self) -> Arc<SystemGraph> { Arc::clone(&self.graph) }

    pub fn set_jump_range(&mut self, jump_range: f64) -> Result<()> {
        if jump_range == self.jump_range() { return Ok(()); }
        match self.catalog.build_graph(jump_range) {
            Ok(g) => {
                log::info!("jump range {} -> {}: {} jumps", self.jump_range(), jump_range, g.edge_count());
                self.graph = Arc::new(g);
                Ok(())
            }
            Err(e) => {
                log::warn!("keeping jump range {}: {}", self.jump_range(), e);
                Err(e)
            }
        }
    }

    /// Replaces the point set and rebuilds at the current range.
    pub fn set_catalog(&mut self, catalog: Catalog) -> Result<()> {
        let graph = catalog.build_graph(self.jump_range())?;
        let keep = self.default_route.as_ref().is_some_and(|(o, d)| catalog.index_of(o).is_some() && catalog.index_of(d).is_some());
        if !keep { self.default_route = None; }
        self.catalog = catalog;
        self.graph = Arc::new(graph);
        Ok(())
    }

    pub fn route(&self, from: &str, to: &str) -> Result<PathOutcome<String>> {
        dijkstra::shortest_path(&*self.graph, &from.to_string(), &to.to_string())
    }

    pub fn route_with_stats(&self, from: &str, to: &str) -> Result<(PathOutcome<String>, SearchStats)> {
        dijkstra::shortest_path_with_stats(&*self.graph, &from.to_string(), &to.to_string())
    }

    /// Route between the configured origin and destination.
    pub fn default_route(&self) -> Result<PathOutcome<String>> {
        match &self.default_route {
            Some((o, d)) => self.route(o, d),
            None => Err(NavError::InvalidConfig("no origin/destination configured".into())),
        }
    }

    /// Smallest range that would connect the two systems.
    pub fn required_range(&self, from: &str, to: &str) -> Result<f64> {
        analysis::required_jump_range(&self.catalog, from, to)
    }

    /// Smallest range that connects every pair of systems.
    pub fn absolute_min_range(&self) -> f64 { analysis::absolute_min_jump_range(&self.catalog) }

    /// Systems reachable from `name` at the current range, including itself.
    pub fn reachable_from(&self, name: &str) -> Result<Vec<&str>> {
        let v = self.graph.require(&name.to_string())?;
        let labels = analysis::connected_components(&*self.graph);
        let label = labels[v as usize];
        Ok(labels.iter().enumerate().filter(|(_, l)| **l == label).map(|(i, _)| self.graph.id(i as u32).as_str()).collect())
    }
}
