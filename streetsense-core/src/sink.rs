//! Persist captured images alongside the report.

use thiserror::Error;

use crate::CapturedImage;

/// Errors from [`ImageSink::persist`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing the image failed.
    #[error("failed to persist image {identifier}")]
    Persist {
        /// Identifier the image would have been stored under.
        identifier: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Store captured images and return the identifier each was stored under.
///
/// Persistence is best effort: a failure is logged and the image is still
/// scored.
pub trait ImageSink: Send + Sync {
    /// Store `image`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the image cannot be written.
    fn persist(&self, image: &CapturedImage) -> Result<String, SinkError>;
}
