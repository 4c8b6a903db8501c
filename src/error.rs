use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Errors surfaced at the component boundary.
///
/// `Clone` is required because the memoized engine load hands the same result
/// to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("chart not found: `{id}`")]
    ChartNotFound { id: String },

    #[error("failed to load plotting engine from `{url}`: {reason}")]
    EngineLoad { url: String, reason: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}
