use services::{
    CompletedSubmission, PendingSubmission, SubmitOutcome, SurveyController, SurveyError,
    SurveyServices,
};
use survey_core::model::Page;
use tracing::warn;

use crate::views::ViewError;
use crate::vm::form_vm::FormState;

/// Survey controller bound to a [`FormState`].
pub struct SurveyVm {
    controller: SurveyController<FormState>,
}

impl SurveyVm {
    #[must_use]
    pub fn new(controller: SurveyController<FormState>) -> Self {
        Self { controller }
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        self.controller.surface()
    }

    pub fn edit(&mut self, apply: impl FnOnce(&mut FormState)) {
        apply(self.controller.surface_mut());
    }

    #[must_use]
    pub fn current_page(&self) -> Page {
        self.controller.current_page()
    }

    #[must_use]
    pub fn page_label(&self) -> String {
        format!(
            "Page {} of {}",
            self.controller.current_page().number(),
            self.controller.total_pages()
        )
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    /// Move forward one page. A rejected page stays where it is and leaves
    /// the notice on the form.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for storage or summary failures.
    pub async fn next(&mut self) -> Result<(), ViewError> {
        match self.controller.advance().await {
            Ok(_) | Err(SurveyError::ValidationFailed(_) | SurveyError::SubmissionInFlight) => {
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "advance failed");
                Err(ViewError::Unknown)
            }
        }
    }

    pub fn back(&mut self) {
        if let Err(err) = self.controller.retreat() {
            warn!(error = %err, "retreat ignored");
        }
    }

    /// Claim the in-flight gate. `None` while another submission is pending.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the record cannot be serialized.
    pub fn begin_submit(&mut self) -> Result<Option<PendingSubmission>, ViewError> {
        match self.controller.prepare_submission() {
            Ok(pending) => Ok(Some(pending)),
            Err(SurveyError::SubmissionInFlight) => Ok(None),
            Err(err) => {
                warn!(error = %err, "submission could not be prepared");
                Err(ViewError::Unknown)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the post-submit bookkeeping fails.
    pub async fn finish_submit(
        &mut self,
        completed: CompletedSubmission,
    ) -> Result<SubmitOutcome, ViewError> {
        self.controller
            .complete_submission(completed)
            .await
            .map_err(|err| {
                warn!(error = %err, "submission bookkeeping failed");
                ViewError::Unknown
            })
    }

    /// Pending navigation requested by the controller, cleared on read.
    /// Held back while a notice is still waiting to be acknowledged.
    pub fn take_redirect(&mut self) -> Option<String> {
        if self.form().notice.is_some() {
            return None;
        }
        self.controller.surface_mut().redirect.take()
    }

    /// Acknowledge the current notice and release any navigation queued behind it.
    pub fn dismiss_notice(&mut self) -> Option<String> {
        self.controller.surface_mut().dismiss_notice();
        self.take_redirect()
    }
}

/// # Errors
///
/// Returns `ViewError::Unavailable` when the stores cannot be reached.
pub async fn start_survey(services: &SurveyServices) -> Result<SurveyVm, ViewError> {
    match services.start_survey(FormState::new()).await {
        Ok(controller) => Ok(SurveyVm::new(controller)),
        Err(SurveyError::Storage(err)) => {
            warn!(error = %err, "survey storage unavailable");
            Err(ViewError::Unavailable)
        }
        Err(err) => {
            warn!(error = %err, "survey failed to start");
            Err(ViewError::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use services::{SUBMITTED_NOTICE, SubmissionClient, SubmitError, SurveyDisplay};
    use storage::repository::Storage;

    use super::*;

    struct Accepting;

    #[async_trait]
    impl SubmissionClient for Accepting {
        async fn submit(&self, _body: &str) -> Result<(), SubmitError> {
            Ok(())
        }
    }

    fn services() -> SurveyServices {
        SurveyServices::new(Storage::in_memory(), Arc::new(Accepting), "/thank-you")
    }

    #[tokio::test(flavor = "current_thread")]
    async fn start_shows_first_page_with_zero_progress() {
        let vm = start_survey(&services()).await.expect("start");
        assert_eq!(vm.current_page(), Page::BasicInfo);
        assert_eq!(vm.page_label(), "Page 1 of 4");
        assert!(vm.form().is_visible(Page::BasicInfo));
        assert!(vm.form().progress_percent.abs() < f64::EPSILON);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn walking_to_the_end_renders_the_summary() {
        let mut vm = start_survey(&services()).await.expect("start");
        vm.edit(|form| form.name = "Ada".into());
        vm.next().await.expect("to dietary");
        vm.next().await.expect("to cuisine");
        vm.next().await.expect("to summary");

        assert_eq!(vm.current_page(), Page::Summary);
        let summary = vm.form().summary.clone().expect("summary");
        assert_eq!(summary.name, "Ada");
        assert_eq!(summary.dietary_restrictions, "None");
        assert_eq!(summary.spice_level, "3/5");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn submit_phases_toggle_controls_and_redirect() {
        let mut vm = start_survey(&services()).await.expect("start");
        let pending = vm.begin_submit().expect("prepare").expect("gate free");
        assert!(!vm.form().controls_enabled);
        assert!(vm.begin_submit().expect("second prepare").is_none());

        let completed = pending.send().await;
        let outcome = vm.finish_submit(completed).await.expect("finish");
        assert!(outcome.is_submitted());
        assert!(vm.form().controls_enabled);
        assert_eq!(vm.form().notice.as_deref(), Some(SUBMITTED_NOTICE));
        assert!(vm.take_redirect().is_none());

        assert_eq!(vm.dismiss_notice().as_deref(), Some("/thank-you"));
        assert!(vm.form().notice.is_none());
        assert!(vm.take_redirect().is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn dismissing_a_notice_without_redirect_stays_on_the_form() {
        let mut vm = start_survey(&services()).await.expect("start");
        vm.edit(|form| form.notify("Please fill in all required fields."));
        assert!(vm.dismiss_notice().is_none());
        assert!(vm.form().notice.is_none());
        assert_eq!(vm.current_page(), Page::BasicInfo);
    }
}
