use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cuisine options offered by the multi-select, in display order.
pub const CUISINE_OPTIONS: [(&str, &str); 6] = [
    ("italian", "Italian"),
    ("mexican", "Mexican"),
    ("chinese", "Chinese"),
    ("japanese", "Japanese"),
    ("indian", "Indian"),
    ("thai", "Thai"),
];

/// Validated cuisine tag (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CuisineTag(String);

impl CuisineTag {
    /// Create a validated cuisine tag.
    ///
    /// # Errors
    ///
    /// Returns `CuisineTagError::EmptyTag` if the tag is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CuisineTagError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CuisineTagError::EmptyTag);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tags for every entry of [`CUISINE_OPTIONS`].
    #[must_use]
    pub fn options() -> Vec<Self> {
        CUISINE_OPTIONS
            .iter()
            .map(|(id, _)| Self((*id).to_string()))
            .collect()
    }

    /// Display label, falling back to the raw tag for values outside the option list.
    #[must_use]
    pub fn label(&self) -> &str {
        CUISINE_OPTIONS
            .iter()
            .find(|(id, _)| *id == self.0)
            .map_or(self.0.as_str(), |(_, label)| label)
    }
}

impl TryFrom<String> for CuisineTag {
    type Error = CuisineTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CuisineTag> for String {
    fn from(tag: CuisineTag) -> Self {
        tag.0
    }
}

impl std::fmt::Display for CuisineTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CuisineTagError {
    #[error("cuisine tag cannot be empty")]
    EmptyTag,
}
