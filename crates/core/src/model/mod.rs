mod answers;
mod cuisine;
mod dietary;
mod page;
mod summary;

pub use answers::{AnswerRecord, RecordError};
pub use cuisine::{CUISINE_OPTIONS, CuisineTag, CuisineTagError};
pub use dietary::DietaryRestriction;
pub use page::{NavigationState, Page, PageError, PageTransition, TOTAL_PAGES};
pub use summary::{NO_RESTRICTIONS, SummaryError, SurveySummary};
