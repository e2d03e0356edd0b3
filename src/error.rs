use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bearer token variable is unset or empty.
    #[error("{0} environment variable not set.")]
    MissingToken(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode query: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
