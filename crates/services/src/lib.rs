#![forbid(unsafe_code)]

pub mod app_services;
pub mod controller;
pub mod error;
pub mod pages;
pub mod submission;
pub mod surface;
pub mod validation;
pub mod visits;

pub use app_services::SurveyServices;
pub use controller::{
    CompletedSubmission, PendingSubmission, SUBMIT_FAILED_NOTICE, SUBMITTED_NOTICE, SubmitOutcome,
    SurveyController, SurveyDeps,
};
pub use error::{AppServicesError, SubmissionConfigError, SubmitError, SurveyError};
pub use pages::PageForm;
pub use submission::{
    HttpSubmissionClient, InFlightGate, InFlightGuard, SubmissionClient, SubmissionConfig,
};
pub use surface::{FormInputs, SurveyDisplay, SurveySurface, TextField};
pub use validation::{AlwaysValid, PageValidator, VALIDATION_NOTICE};
pub use visits::VisitTracker;
