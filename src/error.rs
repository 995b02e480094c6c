use crate::sun::oracle::OracleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("malformed settings: {0}")]
    Settings(#[from] toml::de::Error),
}
