mod state;
mod survey;
mod thank_you;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use state::{ViewError, ViewState, view_state_from_resource};
pub use survey::{SurveyIntent, SurveyView};
pub use thank_you::ThankYouView;
