use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Inline options are not valid JSON: {0}")]
    Options(#[source] serde_json::Error),
    #[error("Malformed event on line {line}: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot serialize result document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Cannot install logger: {0}")]
    Logging(#[from] log::SetLoggerError),
}
