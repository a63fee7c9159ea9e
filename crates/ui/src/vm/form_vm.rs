use std::collections::BTreeSet;

use services::{FormInputs, SurveyDisplay, TextField};
use survey_core::model::{CuisineTag, DietaryRestriction, Page, SurveySummary};

/// Midpoint of the 1..=5 spice slider.
pub const DEFAULT_SPICE_LEVEL: &str = "3";

/// Render-side copy of every control on the survey form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub spice_level: String,
    pub dietary: BTreeSet<DietaryRestriction>,
    pub cuisine_options: Vec<CuisineTag>,
    pub cuisines: BTreeSet<String>,
    pub visible: BTreeSet<Page>,
    pub progress_percent: f64,
    pub summary: Option<SurveySummary>,
    pub notice: Option<String>,
    pub redirect: Option<String>,
    pub controls_enabled: bool,
    /// False while the form is only a snapshot and edits would go nowhere.
    pub inputs_enabled: bool,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            spice_level: DEFAULT_SPICE_LEVEL.to_string(),
            dietary: BTreeSet::new(),
            cuisine_options: CuisineTag::options(),
            cuisines: BTreeSet::new(),
            visible: BTreeSet::new(),
            progress_percent: 0.0,
            summary: None,
            notice: None,
            redirect: None,
            controls_enabled: true,
            inputs_enabled: true,
        }
    }

    #[must_use]
    pub fn is_visible(&self, page: Page) -> bool {
        self.visible.contains(&page)
    }

    /// Inline style for a page container.
    #[must_use]
    pub fn display_style(&self, page: Page) -> &'static str {
        if self.is_visible(page) {
            "display: block;"
        } else {
            "display: none;"
        }
    }

    #[must_use]
    pub fn progress_style(&self) -> String {
        format!("width: {}%;", self.progress_percent)
    }

    pub fn toggle_dietary(&mut self, restriction: DietaryRestriction) {
        let checked = self.dietary.contains(&restriction);
        self.set_checked(restriction, !checked);
    }

    pub fn toggle_cuisine(&mut self, cuisine: &CuisineTag) {
        let selected = self.is_cuisine_selected(cuisine);
        self.set_cuisine_selected(cuisine, !selected);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Read-only copy shown while the controller is busy.
    #[must_use]
    pub fn checked_out(mut self) -> Self {
        self.controls_enabled = false;
        self.inputs_enabled = false;
        self
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormInputs for FormState {
    fn text(&self, field: TextField) -> String {
        match field {
            TextField::Name => self.name.clone(),
            TextField::Email => self.email.clone(),
            TextField::SpiceLevel => self.spice_level.clone(),
        }
    }

    fn set_text(&mut self, field: TextField, value: &str) {
        let slot = match field {
            TextField::Name => &mut self.name,
            TextField::Email => &mut self.email,
            TextField::SpiceLevel => &mut self.spice_level,
        };
        *slot = value.to_string();
    }

    fn is_checked(&self, restriction: DietaryRestriction) -> bool {
        self.dietary.contains(&restriction)
    }

    fn set_checked(&mut self, restriction: DietaryRestriction, checked: bool) {
        if checked {
            self.dietary.insert(restriction);
        } else {
            self.dietary.remove(&restriction);
        }
    }

    fn cuisine_options(&self) -> Vec<CuisineTag> {
        self.cuisine_options.clone()
    }

    fn is_cuisine_selected(&self, cuisine: &CuisineTag) -> bool {
        self.cuisines.contains(cuisine.as_str())
    }

    fn set_cuisine_selected(&mut self, cuisine: &CuisineTag, selected: bool) {
        if selected {
            self.cuisines.insert(cuisine.as_str().to_string());
        } else {
            self.cuisines.remove(cuisine.as_str());
        }
    }
}

impl SurveyDisplay for FormState {
    fn show_page(&mut self, page: Page) {
        self.visible.insert(page);
    }

    fn hide_page(&mut self, page: Page) {
        self.visible.remove(&page);
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress_percent = percent;
    }

    fn render_summary(&mut self, summary: &SurveySummary) {
        self.summary = Some(summary.clone());
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }

    fn navigate(&mut self, destination: &str) {
        self.redirect = Some(destination.to_string());
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }
}
