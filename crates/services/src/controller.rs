use std::sync::Arc;

use storage::repository::{KeyValueStore, keys};
use survey_core::model::{AnswerRecord, NavigationState, Page, SurveySummary};
use tracing::{debug, error, info, warn};

use crate::error::{SubmitError, SurveyError};
use crate::pages::PageForm;
use crate::submission::{InFlightGate, InFlightGuard, SubmissionClient};
use crate::surface::SurveySurface;
use crate::validation::{PageValidator, VALIDATION_NOTICE};
use crate::visits::VisitTracker;

pub const SUBMITTED_NOTICE: &str = "Thank you for submitting your food preferences!";
pub const SUBMIT_FAILED_NOTICE: &str =
    "There was an error submitting your preferences. Please try again.";

/// Collaborators a controller is built from.
#[derive(Clone)]
pub struct SurveyDeps {
    pub persistent: Arc<dyn KeyValueStore>,
    pub session: Arc<dyn KeyValueStore>,
    pub client: Arc<dyn SubmissionClient>,
    pub validator: Arc<dyn PageValidator>,
    pub confirmation_path: String,
}

/// Result of a submission attempt that reached the network.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted,
    /// Reported to the user; the answers stay in the session store.
    Failed(SubmitError),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// A serialized record waiting to be sent. Holds the in-flight gate until dropped.
pub struct PendingSubmission {
    body: String,
    client: Arc<dyn SubmissionClient>,
    guard: InFlightGuard,
}

impl PendingSubmission {
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Perform the network call. Does not touch the controller.
    pub async fn send(self) -> CompletedSubmission {
        let result = self.client.submit(&self.body).await;
        CompletedSubmission {
            result,
            guard: self.guard,
        }
    }
}

/// Network result of a `PendingSubmission`, still holding the in-flight gate.
pub struct CompletedSubmission {
    result: Result<(), SubmitError>,
    guard: InFlightGuard,
}

/// Drives the survey: page cursor, answer record, persistence and submission.
pub struct SurveyController<S> {
    nav: NavigationState,
    record: AnswerRecord,
    surface: S,
    session: Arc<dyn KeyValueStore>,
    visits: VisitTracker,
    client: Arc<dyn SubmissionClient>,
    validator: Arc<dyn PageValidator>,
    confirmation_path: String,
    gate: InFlightGate,
    visit_count: u64,
}

impl<S: SurveySurface> SurveyController<S> {
    /// Count the visit, restore any in-progress answers and show the first page.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if either store cannot be accessed.
    pub async fn start(deps: SurveyDeps, surface: S) -> Result<Self, SurveyError> {
        let visits = VisitTracker::new(deps.persistent);
        let visit_count = visits.record_visit().await?;
        info!(visit_count, "survey started");

        let mut controller = Self {
            nav: NavigationState::new(),
            record: AnswerRecord::new(),
            surface,
            session: deps.session,
            visits,
            client: deps.client,
            validator: deps.validator,
            confirmation_path: deps.confirmation_path,
            gate: InFlightGate::new(),
            visit_count,
        };

        controller.hydrate().await?;
        controller.surface.show_page(controller.nav.current());
        controller.refresh_progress();
        controller.sync_controls();
        Ok(controller)
    }

    /// Restore the answer record from the session store and push it into the form.
    ///
    /// Absent or malformed data leaves the record empty.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if the session store cannot be read.
    pub async fn hydrate(&mut self) -> Result<(), SurveyError> {
        let Some(raw) = self.session.get(keys::FORM_DATA).await? else {
            return Ok(());
        };

        match AnswerRecord::from_json(&raw) {
            Ok(record) => {
                self.record = record;
                for page in Page::ALL {
                    page.populate(&self.record, &mut self.surface);
                }
                debug!("restored in-progress answers");
            }
            Err(err) => {
                warn!(error = %err, "discarding malformed session answers");
            }
        }
        Ok(())
    }

    /// Copy the fields owned by `page` into the record, then persist the whole record.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError` if serialization or the session write fails.
    pub async fn collect_page(&mut self, page: Page) -> Result<(), SurveyError> {
        page.collect(&self.surface, &mut self.record);
        let json = self.record.to_json()?;
        self.session.set(keys::FORM_DATA, &json).await?;
        Ok(())
    }

    #[must_use]
    pub fn validate(&self, page: Page) -> bool {
        self.validator.validate(page, &self.surface)
    }

    /// Validate and collect the current page, then move forward one page.
    ///
    /// On the last page only the collection happens.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::ValidationFailed` (after notifying the user),
    /// `SurveyError::SubmissionInFlight` while a submission is pending, or
    /// collection/summary errors.
    pub async fn advance(&mut self) -> Result<Page, SurveyError> {
        self.ensure_idle()?;
        let page = self.nav.current();
        if !self.validate(page) {
            self.surface.notify(VALIDATION_NOTICE);
            return Err(SurveyError::ValidationFailed(page));
        }

        self.collect_page(page).await?;

        if let Some(transition) = self.nav.advance() {
            self.surface.hide_page(transition.from);
            self.surface.show_page(transition.to);
            if self.nav.is_last() {
                self.render_summary()?;
            }
            self.refresh_progress();
            debug!(from = transition.from.number(), to = transition.to.number(), "advanced");
        }
        Ok(self.nav.current())
    }

    /// Move back one page without collecting. No-op on the first page.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::SubmissionInFlight` while a submission is pending.
    pub fn retreat(&mut self) -> Result<Page, SurveyError> {
        self.ensure_idle()?;
        if let Some(transition) = self.nav.retreat() {
            self.surface.hide_page(transition.from);
            self.surface.show_page(transition.to);
            self.refresh_progress();
            debug!(from = transition.from.number(), to = transition.to.number(), "retreated");
        }
        Ok(self.nav.current())
    }

    /// Render the summary of the current record.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Summary` if a list field was never collected.
    pub fn render_summary(&mut self) -> Result<SurveySummary, SurveyError> {
        let summary = SurveySummary::from_record(&self.record)?;
        self.surface.render_summary(&summary);
        Ok(summary)
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.nav.progress_percent()
    }

    /// Claim the in-flight gate, disable the controls and serialize the record.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::SubmissionInFlight` if a submission is already
    /// pending, or `SurveyError::Record` if serialization fails.
    pub fn prepare_submission(&mut self) -> Result<PendingSubmission, SurveyError> {
        let guard = self
            .gate
            .try_acquire()
            .ok_or(SurveyError::SubmissionInFlight)?;
        let body = self.record.to_json()?;
        self.sync_controls();
        Ok(PendingSubmission {
            body,
            client: Arc::clone(&self.client),
            guard,
        })
    }

    /// Apply the network result: clear the session copy and flag completion on
    /// success, report the failure otherwise. Releases the gate on every path.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` if the success bookkeeping cannot be written.
    pub async fn complete_submission(
        &mut self,
        completed: CompletedSubmission,
    ) -> Result<SubmitOutcome, SurveyError> {
        let CompletedSubmission { result, guard } = completed;
        let outcome = self.apply_submission_result(result).await;
        drop(guard);
        self.sync_controls();
        outcome
    }

    /// Prepare, send and complete a submission in one call.
    ///
    /// # Errors
    ///
    /// See [`Self::prepare_submission`] and [`Self::complete_submission`].
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SurveyError> {
        let pending = self.prepare_submission()?;
        let completed = pending.send().await;
        self.complete_submission(completed).await
    }

    /// Push the gate state to the form's trigger controls.
    pub fn sync_controls(&mut self) {
        self.surface.set_controls_enabled(!self.gate.is_held());
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.gate.is_held()
    }

    #[must_use]
    pub fn current_page(&self) -> Page {
        self.nav.current()
    }

    #[must_use]
    pub fn total_pages(&self) -> u8 {
        self.nav.total_pages()
    }

    #[must_use]
    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    /// Visit count recorded when this controller started.
    #[must_use]
    pub fn visit_count(&self) -> u64 {
        self.visit_count
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn ensure_idle(&self) -> Result<(), SurveyError> {
        if self.gate.is_held() {
            return Err(SurveyError::SubmissionInFlight);
        }
        Ok(())
    }

    fn refresh_progress(&mut self) {
        let percent = self.nav.progress_percent();
        self.surface.set_progress(percent);
    }

    async fn apply_submission_result(
        &mut self,
        result: Result<(), SubmitError>,
    ) -> Result<SubmitOutcome, SurveyError> {
        match result {
            Ok(()) => {
                self.session.remove(keys::FORM_DATA).await?;
                self.visits.mark_completed().await?;
                info!("survey submitted");
                self.surface.notify(SUBMITTED_NOTICE);
                self.surface.navigate(&self.confirmation_path);
                Ok(SubmitOutcome::Submitted)
            }
            Err(err) => {
                error!(error = %err, "survey submission failed");
                self.surface.notify(SUBMIT_FAILED_NOTICE);
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }
}
