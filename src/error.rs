use thiserror::Error;

/// Top-level error type for polyline offsetting.
#[derive(Debug, Error)]
pub enum PolyoffsetError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors caused by invalid caller input.
#[derive(Debug, Error, PartialEq)]
pub enum ArgumentError {
    #[error("polyline has no points")]
    EmptyPolyline,

    #[error("at least 2 points are required, got {count}")]
    TooFewPoints { count: usize },

    #[error("at least 2 distinct points are required, got {count} after removing duplicates")]
    TooFewDistinctPoints { count: usize },

    #[error("expected {expected} distances (one per segment), got {actual}")]
    DistanceCountMismatch { expected: usize, actual: usize },

    #[error("distance at index {index} is not finite: {value}")]
    NonFiniteDistance { index: usize, value: f64 },

    #[error("cosine threshold {0} must be finite and within [-1, 1]")]
    InvalidThreshold(f64),

    #[error("reference orientation {0} must be finite")]
    InvalidOrientation(f64),
}

/// Errors raised when a corner has no derivable offset geometry.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("180-degree reversal at vertex {index} ({x}, {y}) has no offset side")]
    Reversal { index: usize, x: f64, y: f64 },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`PolyoffsetError`].
pub type Result<T> = std::result::Result<T, PolyoffsetError>;
