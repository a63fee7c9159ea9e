use thiserror::Error;

use crate::model::{CuisineTagError, PageError, RecordError, SummaryError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    CuisineTag(#[from] CuisineTagError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
