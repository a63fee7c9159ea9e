//! Contracts for the visible form the controller drives.

use survey_core::model::{CuisineTag, DietaryRestriction, Page, SurveySummary};

/// Free-text controls on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Email,
    SpiceLevel,
}

impl TextField {
    /// Element identifier of the control.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::SpiceLevel => "spice-level",
        }
    }
}

/// Read/write access to the input controls.
pub trait FormInputs {
    fn text(&self, field: TextField) -> String;
    fn set_text(&mut self, field: TextField, value: &str);

    fn is_checked(&self, restriction: DietaryRestriction) -> bool;
    fn set_checked(&mut self, restriction: DietaryRestriction, checked: bool);

    /// Options of the cuisine multi-select, in display order.
    fn cuisine_options(&self) -> Vec<CuisineTag>;
    fn is_cuisine_selected(&self, cuisine: &CuisineTag) -> bool;
    fn set_cuisine_selected(&mut self, cuisine: &CuisineTag, selected: bool);

    /// Selected cuisine options, in display order.
    fn selected_cuisines(&self) -> Vec<CuisineTag> {
        self.cuisine_options()
            .into_iter()
            .filter(|option| self.is_cuisine_selected(option))
            .collect()
    }
}

/// Output side of the form: page visibility, progress, notices, navigation.
pub trait SurveyDisplay {
    fn show_page(&mut self, page: Page);
    fn hide_page(&mut self, page: Page);
    fn set_progress(&mut self, percent: f64);
    fn render_summary(&mut self, summary: &SurveySummary);
    /// Blocking user notification.
    fn notify(&mut self, message: &str);
    fn navigate(&mut self, destination: &str);
    /// Enable or disable the next/previous/submit triggers.
    fn set_controls_enabled(&mut self, enabled: bool);
}

/// Everything a `SurveyController` needs from its form.
pub trait SurveySurface: FormInputs + SurveyDisplay {}

impl<T: FormInputs + SurveyDisplay> SurveySurface for T {}
