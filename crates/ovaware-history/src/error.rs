use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no data directory found")]
    NoDataDir,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
