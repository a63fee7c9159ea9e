use std::sync::Arc;

use storage::repository::Storage;

use crate::controller::{SurveyController, SurveyDeps};
use crate::error::{AppServicesError, SurveyError};
use crate::submission::{HttpSubmissionClient, SubmissionClient, SubmissionConfig};
use crate::surface::SurveySurface;
use crate::validation::{AlwaysValid, PageValidator};
use crate::visits::VisitTracker;

/// Assembles storage, submission and validation for app-facing survey controllers.
#[derive(Clone)]
pub struct SurveyServices {
    storage: Storage,
    client: Arc<dyn SubmissionClient>,
    validator: Arc<dyn PageValidator>,
    confirmation_path: String,
}

impl SurveyServices {
    #[must_use]
    pub fn new(
        storage: Storage,
        client: Arc<dyn SubmissionClient>,
        confirmation_path: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            client,
            validator: Arc::new(AlwaysValid),
            confirmation_path: confirmation_path.into(),
        }
    }

    /// Build services backed by `SQLite` storage and an HTTP submission client.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        config: &SubmissionConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let client: Arc<dyn SubmissionClient> = Arc::new(HttpSubmissionClient::from_config(config));
        Ok(Self::new(storage, client, config.confirmation_path()))
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn PageValidator>) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn visits(&self) -> VisitTracker {
        VisitTracker::new(Arc::clone(&self.storage.persistent))
    }

    #[must_use]
    pub fn confirmation_path(&self) -> &str {
        &self.confirmation_path
    }

    #[must_use]
    pub fn deps(&self) -> SurveyDeps {
        SurveyDeps {
            persistent: Arc::clone(&self.storage.persistent),
            session: Arc::clone(&self.storage.session),
            client: Arc::clone(&self.client),
            validator: Arc::clone(&self.validator),
            confirmation_path: self.confirmation_path.clone(),
        }
    }

    /// Start a controller driving `surface`.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError` for storage failures during startup.
    pub async fn start_survey<S: SurveySurface>(
        &self,
        surface: S,
    ) -> Result<SurveyController<S>, SurveyError> {
        SurveyController::start(self.deps(), surface).await
    }
}
