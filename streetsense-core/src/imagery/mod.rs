//! Acquire street-level imagery for a coordinate and heading.
//!
//! The `ImageSource` trait abstracts the imagery provider. Callers request one
//! heading at a time and receive a [`CapturedImage`](crate::CapturedImage) or a
//! [`FetchError`]. Fetch failures are expected and recoverable: the pipeline
//! drops the heading and carries on.

mod error;
mod source;

pub use error::FetchError;
pub use source::{ImageSource, ImageryRequest};
