use thiserror::Error;

/// Errors returned while binding or querying a distance function.
#[derive(Debug, Error)]
pub enum DistanceError {
    /// The attribute has no trained model: it was never trained, or the
    /// model was built against a different header.
    #[error("attribute {index} is not modeled")]
    AttributeNotModeled { index: usize },

    /// A learned table was asked about a label it has never seen.
    #[error("value '{value}' is unknown for attribute '{attribute}'")]
    UnknownValue { attribute: String, value: String },

    #[error("attribute index {index} is out of bounds ({len} attributes)")]
    AttributeOutOfBounds { index: usize, len: usize },

    #[error("dataset has no instances")]
    EmptyDataset,

    #[error("instance header does not match dataset: {0}")]
    HeaderMismatch(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DistanceError>;
