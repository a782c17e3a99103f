use thiserror::Error;

/// Errors from [`crate::imagery::ImageSource::fetch`].
///
/// Endpoints are reported without query strings so credentials never reach
/// logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request to {endpoint} timed out after {timeout_secs}s")]
    Timeout {
        /// Provider endpoint.
        endpoint: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The provider answered with a non-success status.
    #[error("{endpoint} responded with HTTP {status}: {message}")]
    Http {
        /// Provider endpoint.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The provider could not be reached.
    #[error("failed to reach {endpoint}: {message}")]
    Network {
        /// Provider endpoint.
        endpoint: String,
        /// Error detail.
        message: String,
    },
    /// The provider has no imagery near the requested location.
    #[error("no imagery available at {location}")]
    MissingImagery {
        /// `lat,lon` of the request.
        location: String,
    },
    /// The payload was not a decodable image.
    #[error("failed to decode image payload: {message}")]
    Decode {
        /// Error detail.
        message: String,
    },
}
