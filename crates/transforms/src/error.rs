use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Transform of series '{0}' produced zero points")]
    EmptySeries(String),

    #[error("Invalid transform parameter: {0}")]
    InvalidParameter(String),

    #[error("An unexpected error occurred during a transform: {0}")]
    Internal(String),
}
