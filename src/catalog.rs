//! Named star systems and their positions.
//!
//! The JSON form is a plain array, `[{"name": "Sol", "pos": [0.0, 0.0, 0.0]}]`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};
use crate::graph::ProximityGraph;
use crate::metric::{euclidean, Position};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    #[serde(rename = "pos", alias = "position")]
    pub position: Position,
}

impl StarSystem {
    pub fn new(name: impl Into<String>, position: Position) -> Self { Self { name: name.into(), position } }
}

/// Validated set of systems: unique names, finite coordinates.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    systems: Vec<StarSystem>,
    index: HashMap<String, u32>,
}

impl Catalog {
    pub fn new(systems: Vec<StarSystem>) -> Result<Self> {
        if systems.len() > u32::MAX as usize { return Err(NavError::TooManyVertices(systems.len())); }
        let mut index = HashMap::with_capacity(systems.len());
        for (i, s) in systems.iter().enumerate() {
            if s.position.iter().any(|c| !c.is_finite()) { return Err(NavError::NonFinitePosition(s.name.clone())); }
            if index.insert(s.name.clone(), i as u32).is_some() { return Err(NavError::DuplicateSystem(s.name.clone())); }
        }
        Ok(Self { systems, index })
    }

    pub fn from_json(s: &str) -> Result<Self> { Self::new(serde_json::from_str(s)?) }

    pub fn from_reader<R: Read>(r: R) -> Result<Self> { Self::new(serde_json::from_reader(r)?) }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        log::info!("loaded {} systems from {}", catalog.len(), path.as_ref().display());
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(&self.systems)?) }

    /// `n` systems scattered uniformly inside a ball of `radius` around the origin.
    /// A non-finite radius is `InvalidConfig`.
    pub fn random_field<R: Rng>(rng: &mut R, n: usize, radius: f64) -> Result<Self> {
        if !radius.is_finite() { return Err(NavError::InvalidConfig(format!("random field radius must be finite, got {radius}"))); }
        if n > u32::MAX as usize { return Err(NavError::TooManyVertices(n)); }
        let r = radius.abs();
        // Sample the unit ball, then scale, so huge radii never reach the sampler.
        let systems = (0..n).map(|i| {
            let unit = loop {
                let p: [f64; 3] = [rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)];
                if p[0] * p[0] + p[1] * p[1] + p[2] * p[2] <= 1.0 { break p; }
            };
            StarSystem::new(format!("SYS-{i:04}"), unit.map(|c| c * r))
        }).collect::<Vec<_>>();
        let index = systems.iter().enumerate().map(|(i, s)| (s.name.clone(), i as u32)).collect();
        Ok(Self { systems, index })
    }

    #[inline] pub fn len(&self) -> usize { self.systems.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.systems.is_empty() }
    #[inline] pub fn systems(&self) -> &[StarSystem] { &self.systems }

    pub fn index_of(&self, name: &str) -> Option<u32> { self.index.get(name).copied() }

    pub fn require(&self, name: &str) -> Result<u32> {
        self.index_of(name).ok_or_else(|| NavError::UnknownSystem(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&StarSystem> { self.index_of(name).map(|i| &self.systems[i as usize]) }

    pub fn position(&self, name: &str) -> Result<Position> { Ok(self.systems[self.require(name)? as usize].position) }

    pub fn distance(&self, a: &str, b: &str) -> Result<f64> { Ok(euclidean(&self.position(a)?, &self.position(b)?)) }

    #[inline] pub(crate) fn distance_idx(&self, a: u32, b: u32) -> f64 {
        euclidean(&self.systems[a as usize].position, &self.systems[b as usize].position)
    }

    /// `(name, position)` pairs in catalog order, the graph builder's input.
    pub fn points(&self) -> Vec<(String, Position)> {
        self.systems.iter().map(|s| (s.name.clone(), s.position)).collect()
    }

    pub fn build_graph(&self, jump_range: f64) -> Result<ProximityGraph<String>> {
        ProximityGraph::build(&self.points(), jump_range)
    }

    /// Up to `k` other systems ordered by distance from `name`, closest first.
    pub fn nearest(&self, name: &str, k: usize) -> Result<Vec<(&str, f64)>> {
        let from = self.require(name)?;
        let mut out: Vec<(&str, f64)> = (0..self.len() as u32)
            .filter(|&i| i != from)
            .map(|i| (self.systems[i as usize].name.as_str(), self.distance_idx(from, i)))
            .collect();
        out.sort_by(|x, y| x.1.total_cmp(&y.1));
        out.truncate(k);
        Ok(out)
    }

    /// Distance from each system to its nearest neighbour; +inf for a lone system.
    pub fn closest_distances(&self) -> Vec<f64> {
        let n = self.len() as u32;
        (0..n).map(|i| (0..n).filter(|&j| j != i).map(|j| self.distance_idx(i, j)).fold(f64::INFINITY, f64::min)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const SAMPLE: &str = r#"[
        {"name": "Sol", "pos": [0.0, 0.0, 0.0]},
        {"name": "Alpha Centauri", "pos": [-1.64, -1.37, -3.84]},
        {"name": "Barnard's Star", "position": [-0.06, -5.94, 0.49]}
    ]"#;

    #[test]
    fn parses_pos_and_position_keys() {
        let c = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.position("Barnard's Star").unwrap(), [-0.06, -5.94, 0.49]);
        let back = Catalog::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back.systems(), c.systems());
    }

    #[test]
    fn rejects_duplicates_and_nan() {
        let dup = vec![StarSystem::new("Sol", [0.0; 3]), StarSystem::new("Sol", [1.0; 3])];
        assert!(matches!(Catalog::new(dup), Err(NavError::DuplicateSystem(n)) if n == "Sol"));
        let nan = vec![StarSystem::new("Void", [f64::NAN, 0.0, 0.0])];
        assert!(matches!(Catalog::new(nan), Err(NavError::NonFinitePosition(_))));
        assert!(matches!(Catalog::from_json("{"), Err(NavError::Json(_))));
    }

    #[test]
    fn nearest_and_closest() {
        let c = Catalog::from_json(SAMPLE).unwrap();
        let near = c.nearest("Sol", 1).unwrap();
        assert_eq!(near[0].0, "Alpha Centauri");
        let closest = c.closest_distances();
        assert_eq!(closest[0], near[0].1);
        assert!(c.nearest("Vega", 1).is_err());
    }

    #[test]
    fn random_field_stays_inside_radius() {
        let mut rng = SmallRng::seed_from_u64(7);
        let c = Catalog::random_field(&mut rng, 50, 10.0).unwrap();
        assert_eq!(c.len(), 50);
        assert!(c.systems().iter().all(|s| euclidean(&s.position, &[0.0; 3]) <= 10.0 + 1e-9));
        assert!(c.index_of("SYS-0049").is_some());
    }

    #[test]
    fn random_field_rejects_unbounded_radius() {
        let mut rng = SmallRng::seed_from_u64(7);
        for radius in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(Catalog::random_field(&mut rng, 3, radius), Err(NavError::InvalidConfig(_))));
        }
        let wide = Catalog::random_field(&mut rng, 8, f64::MAX).unwrap();
        assert!(wide.systems().iter().all(|s| s.position.iter().all(|c| c.is_finite())));
        assert_eq!(Catalog::random_field(&mut rng, 0, 5.0).unwrap().len(), 0);
    }
}
