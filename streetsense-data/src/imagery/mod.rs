//! HTTP imagery provider.
//!
//! [`StreetViewClient`] implements [`streetsense_core::ImageSource`] against
//! the Street View Static API. Every request asks for the fixed
//! [`ImageryRequest::STANDARD`](streetsense_core::ImageryRequest::STANDARD)
//! capture: 640×640 pixels, 90° field of view, level camera.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use streetsense_core::{Coordinate, Heading, ImageSource};
//! use streetsense_data::imagery::{StreetViewClient, StreetViewConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StreetViewConfig::new("my-api-key").with_timeout(Duration::from_secs(10));
//! let client = StreetViewClient::with_config(config)?;
//! let image = client.fetch(Coordinate::new(47.6, -122.33), Heading::North).await?;
//! assert_eq!(image.pixels().width(), 640);
//! # Ok(())
//! # }
//! ```

mod streetview;

pub use streetview::{
    ClientBuildError, DEFAULT_STREETVIEW_URL, DEFAULT_USER_AGENT, StreetViewClient,
    StreetViewConfig,
};
