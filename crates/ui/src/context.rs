use std::sync::Arc;

use services::{SurveyServices, VisitTracker};

pub trait UiApp: Send + Sync {
    fn app_name(&self) -> &str;
    fn survey_services(&self) -> Arc<SurveyServices>;
}

#[derive(Clone)]
pub struct AppContext {
    app_name: String,
    survey: Arc<SurveyServices>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app_name: app.app_name().to_string(),
            survey: app.survey_services(),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn survey_services(&self) -> Arc<SurveyServices> {
        Arc::clone(&self.survey)
    }

    #[must_use]
    pub fn visits(&self) -> VisitTracker {
        self.survey.visits()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
