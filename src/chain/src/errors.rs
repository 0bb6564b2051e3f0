use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("reference block {reference} is not older than latest block {latest}")]
    InvalidReferenceRange { reference: u64, latest: u64 },

    #[error("chain is at height {latest}, need more than {offset} blocks of history")]
    InsufficientHistory { latest: u64, offset: u64 },

    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        ChainError::QueryFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;
