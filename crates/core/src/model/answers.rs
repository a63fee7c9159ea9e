use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::model::{CuisineTag, DietaryRestriction};

/// All survey responses collected so far.
///
/// Each field is written only by the page that owns it and keeps its value
/// across page transitions until that page is collected again. Absent fields
/// are omitted from the serialized document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(
        default,
        deserialize_with = "known_restrictions",
        skip_serializing_if = "Option::is_none"
    )]
    dietary_restrictions: Option<Vec<DietaryRestriction>>,
    #[serde(
        default,
        deserialize_with = "non_empty_cuisines",
        skip_serializing_if = "Option::is_none"
    )]
    cuisine_types: Option<Vec<CuisineTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spice_level: Option<String>,
}

/// Tag lists keep the ids that still match a restriction and drop the rest.
fn known_restrictions<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<DietaryRestriction>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(raw.map(|ids| {
        ids.iter()
            .filter_map(|id| DietaryRestriction::from_id(id))
            .collect()
    }))
}

fn non_empty_cuisines<'de, D>(deserializer: D) -> Result<Option<Vec<CuisineTag>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(raw.map(|tags| {
        tags.into_iter()
            .filter_map(|tag| CuisineTag::new(tag).ok())
            .collect()
    }))
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("answer record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnswerRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a serialized record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Json` if the document is malformed. Unknown
    /// dietary ids and blank cuisine tags are dropped, not rejected.
    pub fn from_json(raw: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize the record into the JSON document used for the session store
    /// and the submission body.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn dietary_restrictions(&self) -> Option<&[DietaryRestriction]> {
        self.dietary_restrictions.as_deref()
    }

    #[must_use]
    pub fn cuisine_types(&self) -> Option<&[CuisineTag]> {
        self.cuisine_types.as_deref()
    }

    #[must_use]
    pub fn spice_level(&self) -> Option<&str> {
        self.spice_level.as_deref()
    }

    /// Basic information collected on the first page. Values are stored verbatim.
    pub fn record_basic_info(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = Some(name.into());
        self.email = Some(email.into());
    }

    /// Replaces the dietary restrictions collected on the second page.
    pub fn record_dietary_restrictions(&mut self, restrictions: Vec<DietaryRestriction>) {
        self.dietary_restrictions = Some(restrictions);
    }

    /// Cuisine preferences collected on the third page.
    pub fn record_cuisine_preferences(
        &mut self,
        cuisines: Vec<CuisineTag>,
        spice_level: impl Into<String>,
    ) {
        self.cuisine_types = Some(cuisines);
        self.spice_level = Some(spice_level.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(value: &str) -> CuisineTag {
        CuisineTag::new(value).unwrap()
    }

    #[test]
    fn empty_record_serializes_to_empty_object() {
        assert_eq!(AnswerRecord::new().to_json().unwrap(), "{}");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut record = AnswerRecord::new();
        record.record_dietary_restrictions(vec![DietaryRestriction::GlutenFree]);
        record.record_cuisine_preferences(vec![tag("thai")], "4");

        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["dietaryRestrictions"], serde_json::json!(["gluten-free"]));
        assert_eq!(value["cuisineTypes"], serde_json::json!(["thai"]));
        assert_eq!(value["spiceLevel"], "4");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn round_trips_every_subset_of_fields() {
        for mask in 0_u8..8 {
            let mut record = AnswerRecord::new();
            if mask & 1 != 0 {
                record.record_basic_info("Ada", "ada@example.com");
            }
            if mask & 2 != 0 {
                record.record_dietary_restrictions(vec![
                    DietaryRestriction::Vegetarian,
                    DietaryRestriction::Vegan,
                ]);
            }
            if mask & 4 != 0 {
                record.record_cuisine_preferences(vec![tag("italian"), tag("indian")], "5");
            }

            let restored = AnswerRecord::from_json(&record.to_json().unwrap()).unwrap();
            assert_eq!(restored, record, "mask {mask}");
        }
    }

    #[test]
    fn accepts_documents_written_by_other_clients() {
        let raw = r#"{"name":"","email":"x@y","dietaryRestrictions":[],"spiceLevel":"3"}"#;
        let record = AnswerRecord::from_json(raw).unwrap();
        assert_eq!(record.name(), Some(""));
        assert_eq!(record.dietary_restrictions(), Some(&[][..]));
        assert_eq!(record.cuisine_types(), None);
        assert_eq!(record.spice_level(), Some("3"));
    }

    #[test]
    fn unknown_tags_are_dropped_without_losing_other_fields() {
        let raw = r#"{"name":"Lin","email":"lin@example.com","dietaryRestrictions":["vegan","paleo"],"cuisineTypes":["thai"," "],"spiceLevel":"5"}"#;
        let record = AnswerRecord::from_json(raw).unwrap();
        assert_eq!(record.name(), Some("Lin"));
        assert_eq!(record.email(), Some("lin@example.com"));
        assert_eq!(
            record.dietary_restrictions(),
            Some(&[DietaryRestriction::Vegan][..])
        );
        assert_eq!(record.cuisine_types(), Some(&[tag("thai")][..]));
        assert_eq!(record.spice_level(), Some("5"));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(AnswerRecord::from_json("{not json").is_err());
        assert!(AnswerRecord::from_json(r#"{"dietaryRestrictions":"vegan"}"#).is_err());
        assert!(AnswerRecord::from_json(r#"{"dietaryRestrictions":[1]}"#).is_err());
        assert!(AnswerRecord::from_json("[]").is_err());
    }
}
