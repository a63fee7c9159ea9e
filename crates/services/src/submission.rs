use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{SubmissionConfigError, SubmitError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/food";
pub const DEFAULT_CONFIRMATION_PATH: &str = "/thank-you";

/// Where answers go and where the user lands afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionConfig {
    endpoint: Url,
    confirmation_path: String,
}

impl SubmissionConfig {
    /// # Errors
    ///
    /// Returns `SubmissionConfigError` if the endpoint is not an absolute
    /// http(s) URL.
    pub fn new(
        endpoint: &str,
        confirmation_path: impl Into<String>,
    ) -> Result<Self, SubmissionConfigError> {
        let trimmed = endpoint.trim();
        let endpoint = Url::parse(trimmed).map_err(|_| SubmissionConfigError::InvalidEndpoint {
            raw: trimmed.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SubmissionConfigError::UnsupportedScheme {
                scheme: endpoint.scheme().to_string(),
            });
        }
        Ok(Self {
            endpoint,
            confirmation_path: confirmation_path.into(),
        })
    }

    /// Read `SURVEY_ENDPOINT` and `SURVEY_CONFIRMATION_PATH`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionConfigError` if `SURVEY_ENDPOINT` is set but invalid.
    pub fn from_env() -> Result<Self, SubmissionConfigError> {
        let endpoint = env::var("SURVEY_ENDPOINT")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.into());
        let confirmation_path = env::var("SURVEY_CONFIRMATION_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIRMATION_PATH.into());
        Self::new(&endpoint, confirmation_path)
    }

    #[must_use]
    pub fn with_endpoint(self, endpoint: Url) -> Self {
        Self { endpoint, ..self }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn confirmation_path(&self) -> &str {
        &self.confirmation_path
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint should be valid"),
            confirmation_path: DEFAULT_CONFIRMATION_PATH.into(),
        }
    }
}

/// Delivers a serialized answer record to the survey intake.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// # Errors
    ///
    /// Returns `SubmitError` for transport failures and non-success statuses.
    async fn submit(&self, body: &str) -> Result<(), SubmitError>;
}

#[derive(Clone)]
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: Url,
}

impl HttpSubmissionClient {
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    #[must_use]
    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self::new(config.endpoint().clone())
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, body: &str) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SubmitError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

/// Single-slot flag marking a submission as in flight.
#[derive(Clone, Debug, Default)]
pub struct InFlightGate {
    busy: Arc<AtomicBool>,
}

impl InFlightGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `None` while another guard is alive.
    #[must_use]
    pub fn try_acquire(&self) -> Option<InFlightGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the gate when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
