use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown units '{0}'. Supported units: metric, imperial.")]
    UnknownUnits(String),

    #[error("Invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL '{0}' is not a city page (expected a path like /city/<slug>)")]
    NotACityPath(String),
}
