//! Error types for instance loading and configuration.

use std::io;
use thiserror::Error;

/// Errors raised outside the optimization core.
///
/// The search itself is infallible; everything here comes from reading
/// instances or validating configuration before a run starts.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed instance at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unsupported EDGE_WEIGHT_TYPE `{0}`")]
    UnsupportedWeightType(String),

    #[error("instance declares dimension {expected} but lists {found} coordinates")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("distance matrix row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("instance has no NODE_COORD_SECTION")]
    MissingCoordinates,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
