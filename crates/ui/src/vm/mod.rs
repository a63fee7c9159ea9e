mod form_vm;
mod survey_vm;

pub use form_vm::{DEFAULT_SPICE_LEVEL, FormState};
pub use survey_vm::{SurveyVm, start_survey};
