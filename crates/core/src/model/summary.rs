use thiserror::Error;

use crate::model::AnswerRecord;

/// Marker shown when no dietary restriction was checked.
pub const NO_RESTRICTIONS: &str = "None";

/// Human-readable projection of an [`AnswerRecord`] for the final page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySummary {
    pub name: String,
    pub email: String,
    pub dietary_restrictions: String,
    pub favorite_cuisines: String,
    pub spice_level: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("summary requires `{0}` to be collected first")]
    MissingField(&'static str),
}

impl SurveySummary {
    /// Project the record into display strings.
    ///
    /// Text fields that were never collected render as empty strings. The
    /// list fields must have been collected by their pages.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::MissingField` if dietary restrictions or cuisine
    /// types are absent.
    pub fn from_record(record: &AnswerRecord) -> Result<Self, SummaryError> {
        let restrictions = record
            .dietary_restrictions()
            .ok_or(SummaryError::MissingField("dietaryRestrictions"))?;
        let cuisines = record
            .cuisine_types()
            .ok_or(SummaryError::MissingField("cuisineTypes"))?;

        let dietary_restrictions = if restrictions.is_empty() {
            NO_RESTRICTIONS.to_string()
        } else {
            restrictions
                .iter()
                .map(|restriction| restriction.id())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let favorite_cuisines = cuisines
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            name: record.name().unwrap_or_default().to_string(),
            email: record.email().unwrap_or_default().to_string(),
            dietary_restrictions,
            favorite_cuisines,
            spice_level: format!("{}/5", record.spice_level().unwrap_or_default()),
        })
    }
}

impl std::fmt::Display for SurveySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Personal Information")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f)?;
        writeln!(f, "Dietary Restrictions")?;
        writeln!(f, "{}", self.dietary_restrictions)?;
        writeln!(f)?;
        writeln!(f, "Cuisine Preferences")?;
        writeln!(f, "Favorite Cuisines: {}", self.favorite_cuisines)?;
        write!(f, "Spice Level: {}", self.spice_level)
    }
}
