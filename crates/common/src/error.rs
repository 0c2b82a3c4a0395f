// crates/common/src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid weights: sum is {sum}, expected 1.0")]
    InvalidWeights { sum: f64 },

    #[error("Invalid record {symbol:?}: {reason}")]
    InvalidRecord { symbol: String, reason: String },

    #[error("Invalid anomaly threshold: {0}")]
    InvalidThreshold(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Data source error: {0}")]
    Source(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn invalid_record(symbol: &str, reason: impl Into<String>) -> Self {
        Error::InvalidRecord {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// Only collaborator failures are worth another attempt; validation
    /// errors need corrected input from the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Source(_))
    }
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
