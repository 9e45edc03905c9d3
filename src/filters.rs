use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Dietary restrictions that can be toggled in the meal list.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegan,
    Vegetarian,
    GlutenFree,
    Halal,
}

impl DietaryRestriction {
    /// Tag a meal must carry to satisfy this restriction.
    pub fn tag(&self) -> &str {
        self.as_ref()
    }
}

/// The dietary filter flags. Each flag is independent; all start disabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryFilters {
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub halal: bool,
}

impl DietaryFilters {
    pub fn is_enabled(&self, restriction: DietaryRestriction) -> bool {
        match restriction {
            DietaryRestriction::Vegan => self.vegan,
            DietaryRestriction::Vegetarian => self.vegetarian,
            DietaryRestriction::GlutenFree => self.gluten_free,
            DietaryRestriction::Halal => self.halal,
        }
    }

    pub fn set(&mut self, restriction: DietaryRestriction, enabled: bool) {
        let flag = match restriction {
            DietaryRestriction::Vegan => &mut self.vegan,
            DietaryRestriction::Vegetarian => &mut self.vegetarian,
            DietaryRestriction::GlutenFree => &mut self.gluten_free,
            DietaryRestriction::Halal => &mut self.halal,
        };
        *flag = enabled;
    }

    /// Returns a copy with `restriction` flipped.
    pub fn toggled(mut self, restriction: DietaryRestriction) -> Self {
        let enabled = self.is_enabled(restriction);
        self.set(restriction, !enabled);
        self
    }

    /// Enabled restrictions, in declaration order.
    pub fn active(&self) -> Vec<DietaryRestriction> {
        DietaryRestriction::VARIANTS
            .iter()
            .copied()
            .filter(|restriction| self.is_enabled(*restriction))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// Checks a meal's dietary tags against the enabled filters.
    ///
    /// # Business Rules
    /// - **AND Logic**: every enabled restriction must have its tag present
    /// - **No filters**: every meal is allowed
    /// - Tags compare exactly (`"gluten_free"`, not `"Gluten Free"`)
    pub fn allows<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let active = self.active();
        if active.is_empty() {
            return true;
        }

        let tags: Vec<&str> = tags.into_iter().collect();
        active
            .iter()
            .all(|restriction| tags.iter().any(|tag| *tag == restriction.tag()))
    }

    /// Keeps the items whose tags pass [`DietaryFilters::allows`], preserving order.
    pub fn filter_meals<T, F>(&self, meals: Vec<T>, tags_of: F) -> Vec<T>
    where
        F: Fn(&T) -> &[String],
    {
        if self.is_empty() {
            return meals;
        }

        meals
            .into_iter()
            .filter(|meal| self.allows(tags_of(meal).iter().map(String::as_str)))
            .collect()
    }
}
