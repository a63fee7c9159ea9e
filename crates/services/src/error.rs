//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use survey_core::model::{Page, RecordError, SummaryError};

/// Errors emitted by `SurveyController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SurveyError {
    #[error("page {} failed validation", .0.number())]
    ValidationFailed(Page),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by a `SubmissionClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("submission rejected with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while building a `SubmissionConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmissionConfigError {
    #[error("invalid submission endpoint: {raw}")]
    InvalidEndpoint { raw: String },
    #[error("submission endpoint must use http or https, got {scheme}")]
    UnsupportedScheme { scheme: String },
}

/// Errors emitted while bootstrapping survey services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] SubmissionConfigError),
}
