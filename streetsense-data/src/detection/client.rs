//! HTTP detection client.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use streetsense_core::{CapturedImage, DetectionError, DetectionResult, Detector};

use super::wire::DetectResponse;
use crate::imagery::ClientBuildError;
use crate::jpeg;

/// User agent for detection requests.
pub const DEFAULT_DETECTOR_USER_AGENT: &str = concat!("streetsense-detect/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpDetector`].
#[derive(Debug, Clone)]
pub struct HttpDetectorConfig {
    /// Detection endpoint, for example `http://localhost:8000/detect`.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl HttpDetectorConfig {
    /// Configuration targeting `endpoint` with default timeout and user agent.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_DETECTOR_USER_AGENT.to_owned(),
        }
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

/// Object detector backed by a remote service.
///
/// One client is built per survey and shared by every location task; the
/// model behind the endpoint is loaded once by the service.
#[derive(Debug, Clone)]
pub struct HttpDetector {
    client: Client,
    config: HttpDetectorConfig,
}

impl HttpDetector {
    /// Create a detector for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::HttpClient`] when the HTTP client cannot
    /// be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpDetectorConfig::new(endpoint))
    }

    /// Create a detector from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::HttpClient`] when the HTTP client cannot
    /// be built.
    pub fn with_config(config: HttpDetectorConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    fn convert_reqwest_error(&self, error: reqwest::Error) -> DetectionError {
        let endpoint = self.config.endpoint.clone();
        if error.is_timeout() {
            return DetectionError::Timeout {
                endpoint,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if error.is_decode() {
            return DetectionError::Parse {
                message: error.without_url().to_string(),
            };
        }
        DetectionError::Request {
            endpoint,
            message: error.without_url().to_string(),
        }
    }
}

#[async_trait]
impl Detector for HttpDetector {
    async fn detect(&self, image: &CapturedImage) -> Result<DetectionResult, DetectionError> {
        let body = jpeg::encode(image.pixels()).map_err(|err| DetectionError::Encode {
            message: err.to_string(),
        })?;
        debug!(
            "requesting detections for {} heading {} ({} bytes)",
            image.coordinate(),
            image.heading(),
            body.len()
        );
        let response: DetectResponse = self
            .client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "image/jpeg")
            .body(body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.convert_reqwest_error(err))?
            .json()
            .await
            .map_err(|err| self.convert_reqwest_error(err))?;
        response.into_result().map_err(|message| DetectionError::Request {
            endpoint: self.config.endpoint.clone(),
            message,
        })
    }
}
