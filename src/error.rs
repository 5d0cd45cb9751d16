use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlagpathError {
    #[error("config not found: {0}")]
    UnknownConfig(String),
    #[error("backend error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, FlagpathError>;
