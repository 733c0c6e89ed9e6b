//! Error types for the HTTP layer.

use thiserror::Error;

/// Failure while fetching a page.
///
/// HTTP status codes are not errors here: a 404 or 503 response still has a
/// body, and the caller decides what an empty page means.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, or body read failure.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: wreq::Error,
    },

    /// The configured proxy could not be used.
    #[error("failed to configure proxy {proxy}: {source}")]
    Proxy {
        proxy: String,
        #[source]
        source: wreq::Error,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] wreq::Error),

    /// A URL could not be resolved against the base URL.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport failure reported by a non-wreq fetcher (mocks, alternative clients).
    #[error("request to {url} failed: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// Returns true for failures that happened on the network layer.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network { .. } | FetchError::Other { .. })
    }
}
