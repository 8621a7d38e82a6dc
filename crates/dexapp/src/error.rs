use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    /// The remote listing, membership or detail fetch failed.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Persisted history could not be parsed. Recovered inside the history
    /// store and never returned from its public operations.
    #[error("Malformed persisted state: {0}")]
    MalformedPersistedState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for DexError {
    fn from(err: reqwest::Error) -> Self {
        DexError::SourceUnavailable(err.to_string())
    }
}

impl From<confique::Error> for DexError {
    fn from(err: confique::Error) -> Self {
        DexError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DexError>;
