use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// Navigator settings, usually read from a small JSON file:
///
/// ```json
/// { "jump_range": 25.0, "origin": "Sol", "destination": "Porrima", "catalog": "systems.json" }
/// ```
///
/// Every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub jump_range: f64,
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// Star catalog JSON, relative paths resolved against the working directory.
    pub catalog: Option<PathBuf>,
}

impl Default for NavConfig {
    fn default() -> Self { Self { jump_range: 20.0, origin: None, destination: None, catalog: None } }
}

impl NavConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> { Self::from_json(&fs::read_to_string(path)?) }

    pub fn validate(&self) -> Result<()> {
        if self.jump_range.is_nan() || self.jump_range < 0.0 {
            return Err(NavError::InvalidConfig(format!("jump_range must be >= 0, got {}", self.jump_range)));
        }
        if matches!((&self.origin, &self.destination), (Some(_), None) | (None, Some(_))) {
            return Err(NavError::InvalidConfig("origin and destination must be given together".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg = NavConfig::from_json(r#"{"origin": "Sol", "destination": "Porrima"}"#).unwrap();
        assert_eq!(cfg.jump_range, 20.0);
        assert_eq!(cfg.origin.as_deref(), Some("Sol"));
        assert!(cfg.catalog.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(NavConfig::from_json(r#"{"jump_range": -1.0}"#), Err(NavError::InvalidConfig(_))));
        assert!(matches!(NavConfig::from_json(r#"{"origin": "Sol"}"#), Err(NavError::InvalidConfig(_))));
        assert!(matches!(NavConfig::from_json(r#"{"range": 3.0}"#), Err(NavError::Json(_))));
    }
}
