use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiningError>;

#[derive(Error, Debug)]
pub enum MiningError {
    /// A configuration constraint was violated, or a rule/item-set was
    /// constructed with an out-of-range support/confidence value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation the caller requested can't be provided by this
    /// implementation, e.g. a candidate-count ceiling was exceeded.
    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
