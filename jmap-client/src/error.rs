// jmap-client/src/error.rs
use thiserror::Error;

use crate::http::HttpError;

/// Errors produced by the protocol client.
///
/// Every operation returns the first error encountered; nothing is retried
/// and partial successes are not aggregated.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP-layer failure, including non-2xx responses.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// Malformed or unexpectedly shaped JSON in a response.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A well-formed protocol-level rejection reported by the service.
    #[error("service error {error_type}: {description}")]
    Service {
        error_type: String,
        description: String,
    },

    /// No account was specified and the session carries no default account
    /// for the requested capability.
    #[error("no account specified and no default account for {capability}")]
    NoAccount { capability: String },
}

impl Error {
    pub(crate) fn decode(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
