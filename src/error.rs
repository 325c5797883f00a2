/// Error types shared by the REST client and the UI layer
///
/// Values are `Clone` because they travel inside iced messages.
use std::fmt::Display;
use std::path::Path;

/// Everything that can go wrong while talking to the ad server
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, reset, DNS failure...
    #[error("Network error: {0}")]
    Network(String),

    /// Well-formed response with `success: false`
    #[error("{0}")]
    Server(String),

    /// Body was not the JSON we expected
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The local file could not be read before upload
    #[error("Cannot read {path}: {message}")]
    File { path: String, message: String },

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    #[cold]
    pub fn network<E: Display>(error: E) -> Self {
        ApiError::Network(error.to_string())
    }

    #[cold]
    pub fn malformed<E: Display>(error: E) -> Self {
        ApiError::Malformed(error.to_string())
    }

    #[cold]
    pub fn file<P: AsRef<Path>, E: Display>(path: P, error: E) -> Self {
        ApiError::File {
            path: path.as_ref().display().to_string(),
            message: error.to_string(),
        }
    }

    /// True when the server itself reported the failure
    pub fn is_server(&self) -> bool {
        matches!(self, ApiError::Server(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::malformed(error)
        } else {
            ApiError::network(error)
        }
    }
}

/// Problems loading the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid server URL {url:?}: {reason}")]
    ServerUrl { url: String, reason: String },
}
