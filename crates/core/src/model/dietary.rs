use serde::{Deserialize, Serialize};

/// Dietary restriction tags offered on the second survey page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
}

impl DietaryRestriction {
    /// Every restriction, in the order the checkboxes are laid out.
    pub const ALL: [Self; 3] = [Self::Vegetarian, Self::Vegan, Self::GlutenFree];

    /// Identifier shared by the checkbox control and the persisted tag.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten-free",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-free",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|restriction| restriction.id() == id)
    }
}

impl std::fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
