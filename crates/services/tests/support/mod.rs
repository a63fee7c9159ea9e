#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use services::{
    FormInputs, SubmissionClient, SubmitError, SurveyDeps, SurveyDisplay, SurveyServices,
    TextField,
};
use storage::repository::{InMemoryStore, Storage};
use survey_core::model::{CuisineTag, DietaryRestriction, Page, SurveySummary};
use tokio::sync::Notify;

/// Form double that records everything the controller shows.
#[derive(Default)]
pub struct RecordingSurface {
    pub text: HashMap<TextField, String>,
    pub checked: BTreeSet<DietaryRestriction>,
    pub selected: BTreeSet<String>,
    pub visible: BTreeSet<Page>,
    pub progress: Option<f64>,
    pub summary: Option<SurveySummary>,
    pub notices: Vec<String>,
    pub navigated_to: Option<String>,
    pub controls_enabled: Option<bool>,
}

impl RecordingSurface {
    pub fn type_text(&mut self, field: TextField, value: &str) {
        self.text.insert(field, value.to_string());
    }

    pub fn check(&mut self, restriction: DietaryRestriction) {
        self.checked.insert(restriction);
    }

    pub fn select(&mut self, cuisine: &str) {
        self.selected.insert(cuisine.to_string());
    }
}

impl FormInputs for RecordingSurface {
    fn text(&self, field: TextField) -> String {
        self.text.get(&field).cloned().unwrap_or_default()
    }

    fn set_text(&mut self, field: TextField, value: &str) {
        self.text.insert(field, value.to_string());
    }

    fn is_checked(&self, restriction: DietaryRestriction) -> bool {
        self.checked.contains(&restriction)
    }

    fn set_checked(&mut self, restriction: DietaryRestriction, checked: bool) {
        if checked {
            self.checked.insert(restriction);
        } else {
            self.checked.remove(&restriction);
        }
    }

    fn cuisine_options(&self) -> Vec<CuisineTag> {
        CuisineTag::options()
    }

    fn is_cuisine_selected(&self, cuisine: &CuisineTag) -> bool {
        self.selected.contains(cuisine.as_str())
    }

    fn set_cuisine_selected(&mut self, cuisine: &CuisineTag, selected: bool) {
        if selected {
            self.selected.insert(cuisine.as_str().to_string());
        } else {
            self.selected.remove(cuisine.as_str());
        }
    }
}

impl SurveyDisplay for RecordingSurface {
    fn show_page(&mut self, page: Page) {
        self.visible.insert(page);
    }

    fn hide_page(&mut self, page: Page) {
        self.visible.remove(&page);
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = Some(percent);
    }

    fn render_summary(&mut self, summary: &SurveySummary) {
        self.summary = Some(summary.clone());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn navigate(&mut self, destination: &str) {
        self.navigated_to = Some(destination.to_string());
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = Some(enabled);
    }
}

/// Client answering every request with a fixed status.
#[derive(Default)]
pub struct StubClient {
    reject_with: Option<u16>,
    pub bodies: std::sync::Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl StubClient {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SubmissionClient for StubClient {
    async fn submit(&self, body: &str) -> Result<(), SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(body.to_string());
        match self.reject_with {
            None => Ok(()),
            Some(code) => Err(SubmitError::HttpStatus(
                reqwest::StatusCode::from_u16(code).unwrap(),
            )),
        }
    }
}

/// Client that waits for `release` before accepting.
#[derive(Default)]
pub struct BlockingClient {
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait::async_trait]
impl SubmissionClient for BlockingClient {
    async fn submit(&self, _body: &str) -> Result<(), SubmitError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

pub struct Fixture {
    pub persistent: InMemoryStore,
    pub session: InMemoryStore,
    pub services: SurveyServices,
}

pub fn fixture(client: Arc<dyn SubmissionClient>) -> Fixture {
    fixture_with(InMemoryStore::new(), InMemoryStore::new(), client)
}

pub fn fixture_with(
    persistent: InMemoryStore,
    session: InMemoryStore,
    client: Arc<dyn SubmissionClient>,
) -> Fixture {
    let storage = Storage::new(Arc::new(persistent.clone()), Arc::new(session.clone()));
    let services = SurveyServices::new(storage, client, "/thank-you");
    Fixture {
        persistent,
        session,
        services,
    }
}

impl Fixture {
    pub fn deps(&self) -> SurveyDeps {
        self.services.deps()
    }
}
