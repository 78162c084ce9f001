use thiserror::Error;

/// Errors raised while building graphs, loading catalogs or querying routes.
///
/// An unreachable destination is not an error; see [`crate::PathOutcome`].
#[derive(Debug, Error)]
pub enum NavError {
    #[error("unknown system: {0}")]
    UnknownSystem(String),

    #[error("duplicate system identifier: {0}")]
    DuplicateSystem(String),

    #[error("jump range must be a non-negative number, got {0}")]
    InvalidThreshold(f64),

    #[error("system {0} has a non-finite position")]
    NonFinitePosition(String),

    #[error("metric returned {distance} between {a} and {b}")]
    InvalidDistance { a: String, b: String, distance: f64 },

    #[error("{0} systems exceed the supported vertex count")]
    TooManyVertices(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
