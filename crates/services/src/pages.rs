use survey_core::model::{AnswerRecord, DietaryRestriction, Page};

use crate::surface::{FormInputs, TextField};

/// Field ownership per page: each page collects and populates only its own fields.
pub trait PageForm {
    /// Copy the page's visible input state into `record`.
    fn collect<I: FormInputs + ?Sized>(self, inputs: &I, record: &mut AnswerRecord);

    /// Push the page's stored answers back into the inputs.
    fn populate<I: FormInputs + ?Sized>(self, record: &AnswerRecord, inputs: &mut I);
}

impl PageForm for Page {
    fn collect<I: FormInputs + ?Sized>(self, inputs: &I, record: &mut AnswerRecord) {
        match self {
            Page::BasicInfo => {
                record.record_basic_info(
                    inputs.text(TextField::Name),
                    inputs.text(TextField::Email),
                );
            }
            Page::Dietary => {
                // Recomputed from the checkboxes every time.
                let checked = DietaryRestriction::ALL
                    .into_iter()
                    .filter(|restriction| inputs.is_checked(*restriction))
                    .collect();
                record.record_dietary_restrictions(checked);
            }
            Page::Cuisine => {
                record.record_cuisine_preferences(
                    inputs.selected_cuisines(),
                    inputs.text(TextField::SpiceLevel),
                );
            }
            Page::Summary => {}
        }
    }

    fn populate<I: FormInputs + ?Sized>(self, record: &AnswerRecord, inputs: &mut I) {
        match self {
            Page::BasicInfo => {
                if let Some(name) = record.name().filter(|value| !value.is_empty()) {
                    inputs.set_text(TextField::Name, name);
                }
                if let Some(email) = record.email().filter(|value| !value.is_empty()) {
                    inputs.set_text(TextField::Email, email);
                }
            }
            Page::Dietary => {
                for restriction in record.dietary_restrictions().unwrap_or_default() {
                    inputs.set_checked(*restriction, true);
                }
            }
            Page::Cuisine => {
                let options = inputs.cuisine_options();
                for cuisine in record.cuisine_types().unwrap_or_default() {
                    if options.contains(cuisine) {
                        inputs.set_cuisine_selected(cuisine, true);
                    }
                }
                if let Some(level) = record.spice_level().filter(|value| !value.is_empty()) {
                    inputs.set_text(TextField::SpiceLevel, level);
                }
            }
            Page::Summary => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};

    use survey_core::model::CuisineTag;

    use super::*;

    #[derive(Default)]
    struct Inputs {
        text: HashMap<TextField, String>,
        checked: BTreeSet<DietaryRestriction>,
        selected: Vec<CuisineTag>,
    }

    impl FormInputs for Inputs {
        fn text(&self, field: TextField) -> String {
            self.text.get(&field).cloned().unwrap_or_default()
        }

        fn set_text(&mut self, field: TextField, value: &str) {
            self.text.insert(field, value.to_string());
        }

        fn is_checked(&self, restriction: DietaryRestriction) -> bool {
            self.checked.contains(&restriction)
        }

        fn set_checked(&mut self, restriction: DietaryRestriction, checked: bool) {
            if checked {
                self.checked.insert(restriction);
            } else {
                self.checked.remove(&restriction);
            }
        }

        fn cuisine_options(&self) -> Vec<CuisineTag> {
            CuisineTag::options()
        }

        fn is_cuisine_selected(&self, cuisine: &CuisineTag) -> bool {
            self.selected.contains(cuisine)
        }

        fn set_cuisine_selected(&mut self, cuisine: &CuisineTag, selected: bool) {
            self.selected.retain(|item| item != cuisine);
            if selected {
                self.selected.push(cuisine.clone());
            }
        }
    }

    fn tag(value: &str) -> CuisineTag {
        CuisineTag::new(value).unwrap()
    }

    #[test]
    fn basic_info_is_collected_verbatim() {
        let mut inputs = Inputs::default();
        inputs.set_text(TextField::Name, "  Ada ");
        inputs.set_text(TextField::Email, "not-an-email");

        let mut record = AnswerRecord::new();
        Page::BasicInfo.collect(&inputs, &mut record);
        assert_eq!(record.name(), Some("  Ada "));
        assert_eq!(record.email(), Some("not-an-email"));
        assert_eq!(record.dietary_restrictions(), None);
    }

    #[test]
    fn dietary_collection_replaces_previous_state() {
        let mut inputs = Inputs::default();
        let mut record = AnswerRecord::new();

        inputs.set_checked(DietaryRestriction::Vegetarian, true);
        inputs.set_checked(DietaryRestriction::GlutenFree, true);
        Page::Dietary.collect(&inputs, &mut record);

        inputs.set_checked(DietaryRestriction::Vegetarian, false);
        inputs.set_checked(DietaryRestriction::GlutenFree, false);
        inputs.set_checked(DietaryRestriction::Vegan, true);
        Page::Dietary.collect(&inputs, &mut record);

        assert_eq!(
            record.dietary_restrictions(),
            Some(&[DietaryRestriction::Vegan][..])
        );
    }

    #[test]
    fn cuisines_follow_option_order_not_click_order() {
        let mut inputs = Inputs::default();
        inputs.set_cuisine_selected(&tag("thai"), true);
        inputs.set_cuisine_selected(&tag("italian"), true);
        inputs.set_text(TextField::SpiceLevel, "3");

        let mut record = AnswerRecord::new();
        Page::Cuisine.collect(&inputs, &mut record);
        assert_eq!(
            record.cuisine_types(),
            Some(&[tag("italian"), tag("thai")][..])
        );
        assert_eq!(record.spice_level(), Some("3"));
    }

    #[test]
    fn summary_page_owns_no_fields() {
        let inputs = Inputs::default();
        let mut record = AnswerRecord::new();
        Page::Summary.collect(&inputs, &mut record);
        assert!(record.is_empty());
    }

    #[test]
    fn populate_skips_unknown_cuisines_and_empty_text() {
        let raw = r#"{"name":"","email":"e@x","dietaryRestrictions":["vegan"],"cuisineTypes":["ethiopian","indian"],"spiceLevel":"5"}"#;
        let record = AnswerRecord::from_json(raw).unwrap();

        let mut inputs = Inputs::default();
        inputs.set_text(TextField::Name, "typed");
        for page in Page::ALL {
            page.populate(&record, &mut inputs);
        }

        assert_eq!(inputs.text(TextField::Name), "typed");
        assert_eq!(inputs.text(TextField::Email), "e@x");
        assert!(inputs.is_checked(DietaryRestriction::Vegan));
        assert!(!inputs.is_checked(DietaryRestriction::Vegetarian));
        assert_eq!(inputs.selected_cuisines(), vec![tag("indian")]);
        assert_eq!(inputs.text(TextField::SpiceLevel), "5");
    }
}
