use crate::registry::validate::ValidationFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid registry input: {0}")]
    InvalidInput(String),

    #[error("registry validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("template error: {0}")]
    Template(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
