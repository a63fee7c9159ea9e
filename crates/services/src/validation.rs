use survey_core::model::Page;

use crate::surface::FormInputs;

/// Message shown when a page fails validation.
pub const VALIDATION_NOTICE: &str = "Please fill in all required fields.";

/// Per-page gate consulted before the controller leaves a page.
pub trait PageValidator: Send + Sync {
    fn validate(&self, page: Page, inputs: &dyn FormInputs) -> bool;
}

/// Default rule set: every page is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl PageValidator for AlwaysValid {
    fn validate(&self, _page: Page, _inputs: &dyn FormInputs) -> bool {
        true
    }
}

impl<F> PageValidator for F
where
    F: Fn(Page, &dyn FormInputs) -> bool + Send + Sync,
{
    fn validate(&self, page: Page, inputs: &dyn FormInputs) -> bool {
        self(page, inputs)
    }
}
