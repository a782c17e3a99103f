//! Street View Static API client.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode};
use streetsense_core::{
    CapturedImage, Coordinate, FetchError, Heading, ImageSource, ImageryRequest,
};
use thiserror::Error;

/// Endpoint of the Street View Static API.
pub const DEFAULT_STREETVIEW_URL: &str = "https://maps.googleapis.com/maps/api/streetview";

/// User agent sent with every HTTP request.
pub const DEFAULT_USER_AGENT: &str = concat!("streetsense/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while constructing an HTTP client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// No API key was supplied.
    #[error("an imagery API key is required")]
    MissingApiKey,
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Configuration for [`StreetViewClient`].
#[derive(Clone)]
pub struct StreetViewConfig {
    /// API key appended to every request.
    pub api_key: String,
    /// Endpoint receiving the requests.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Capture parameters.
    pub request: ImageryRequest,
}

// The key stays out of debug output.
impl std::fmt::Debug for StreetViewConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreetViewConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("request", &self.request)
            .finish()
    }
}

impl StreetViewConfig {
    /// Configuration for the public endpoint using `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_STREETVIEW_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            request: ImageryRequest::STANDARD,
        }
    }

    /// Point the client at another endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Fetches street-level images over HTTP.
///
/// The provider is asked to answer with `404` rather than a placeholder image
/// when it has no panorama near a location; that case becomes
/// [`FetchError::MissingImagery`].
#[derive(Debug, Clone)]
pub struct StreetViewClient {
    client: Client,
    config: StreetViewConfig,
}

impl StreetViewClient {
    /// Create a client for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the key is blank or the HTTP client
    /// cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(StreetViewConfig::new(api_key))
    }

    /// Create a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the key is blank or the HTTP client
    /// cannot be built.
    pub fn with_config(config: StreetViewConfig) -> Result<Self, ClientBuildError> {
        if config.api_key.trim().is_empty() {
            return Err(ClientBuildError::MissingApiKey);
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Endpoint without query parameters, safe to log.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.base_url
    }

    fn request(&self, coordinate: Coordinate, heading: Heading) -> RequestBuilder {
        let capture = &self.config.request;
        self.client.get(&self.config.base_url).query(&[
            ("size", capture.size_param()),
            ("location", location_param(coordinate)),
            ("heading", heading.degrees().to_string()),
            ("pitch", capture.pitch.to_string()),
            ("fov", capture.field_of_view.to_string()),
            ("return_error_code", "true".to_owned()),
            ("key", self.config.api_key.clone()),
        ])
    }

    fn convert_reqwest_error(&self, error: reqwest::Error, coordinate: Coordinate) -> FetchError {
        let endpoint = self.endpoint().to_owned();
        if error.is_timeout() {
            return FetchError::Timeout {
                endpoint,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        match error.status() {
            Some(StatusCode::NOT_FOUND) => FetchError::MissingImagery {
                location: location_param(coordinate),
            },
            Some(status) => FetchError::Http {
                endpoint,
                status: status.as_u16(),
                message: error.without_url().to_string(),
            },
            None => FetchError::Network {
                endpoint,
                message: error.without_url().to_string(),
            },
        }
    }
}

fn location_param(coordinate: Coordinate) -> String {
    format!("{},{}", coordinate.latitude(), coordinate.longitude())
}

#[async_trait]
impl ImageSource for StreetViewClient {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        heading: Heading,
    ) -> Result<CapturedImage, FetchError> {
        debug!("fetching imagery for {coordinate} heading {heading}");
        let response = self
            .request(coordinate, heading)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.convert_reqwest_error(err, coordinate))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(err, coordinate))?;
        let pixels = image::load_from_memory(&bytes)
            .map_err(|err| FetchError::Decode {
                message: err.to_string(),
            })?
            .to_rgb8();
        Ok(CapturedImage::new(coordinate, heading, pixels))
    }
}
