//! Page-wide menu selection state.
//!
//! One [`MenuState`] holds the selected meal, the selected day and the
//! dietary filters, each as an observable cell. [`menu_state`] returns the
//! process-wide instance.

use chrono::NaiveDate;
use imkitchen_store::{ReadOnly, Readable, Writable, derived};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::{DATE_FORMAT, DefaultsConfig};
use crate::error::{MenuError, Result};
use crate::filters::{DietaryFilters, DietaryRestriction};

static MENU_STATE: LazyLock<MenuState> = LazyLock::new(MenuState::new);

/// Returns the process-wide menu state, created with canonical defaults on
/// first use.
pub fn menu_state() -> &'static MenuState {
    &MENU_STATE
}

/// Point-in-time copy of every menu value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSnapshot {
    pub selected_meal: String,
    pub selected_day_option: String,
    pub filters: DietaryFilters,
}

impl MenuSnapshot {
    /// Pretty-printed JSON, as shown by the command line.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug)]
pub struct MenuState {
    /// Free-form meal name such as "Breakfast" or "Lunch"; never validated.
    pub selected_meal: Writable<String>,
    /// `YYYY-MM-DD`, or empty when no day is selected.
    pub selected_day_option: Writable<String>,
    pub filters: Writable<DietaryFilters>,
    /// Enabled restrictions, recomputed whenever `filters` changes.
    pub active_restrictions: ReadOnly<Vec<DietaryRestriction>>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState {
    /// Canonical defaults: "Lunch", no day, every filter off.
    pub fn new() -> Self {
        Self::from_defaults(&DefaultsConfig::default())
    }

    pub fn from_defaults(defaults: &DefaultsConfig) -> Self {
        let filters = Writable::named("filters", DietaryFilters::default());
        let active_restrictions =
            derived("active_restrictions", &filters, |filters: &DietaryFilters| {
                filters.active()
            });

        tracing::debug!(
            selected_meal = %defaults.selected_meal,
            selected_day = %defaults.selected_day,
            "Menu state created"
        );

        Self {
            selected_meal: Writable::named("selected_meal", defaults.selected_meal.clone()),
            selected_day_option: Writable::named(
                "selected_day_option",
                defaults.selected_day.clone(),
            ),
            filters,
            active_restrictions,
        }
    }

    /// Parses the selected day.
    ///
    /// Returns `Ok(None)` when no day is selected. Any string may be stored in
    /// the cell; only reading it as a date can fail.
    pub fn selected_date(&self) -> Result<Option<NaiveDate>> {
        let day = self.selected_day_option.get();
        if day.is_empty() {
            return Ok(None);
        }

        NaiveDate::parse_from_str(&day, DATE_FORMAT)
            .map(Some)
            .map_err(|_| MenuError::InvalidDay(day))
    }

    pub fn toggle_filter(&self, restriction: DietaryRestriction) {
        self.filters.update(|filters| filters.toggled(restriction));
    }

    pub fn clear_filters(&self) {
        self.filters.set(DietaryFilters::default());
    }

    pub fn snapshot(&self) -> MenuSnapshot {
        MenuSnapshot {
            selected_meal: self.selected_meal.get(),
            selected_day_option: self.selected_day_option.get(),
            filters: self.filters.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_defaults() {
        let state = MenuState::new();
        assert_eq!(state.selected_meal.get(), "Lunch");
        assert_eq!(state.selected_day_option.get(), "");
        assert_eq!(state.filters.get(), DietaryFilters::default());
        assert!(state.active_restrictions.get().is_empty());
    }

    #[test]
    fn test_selected_date_empty_is_none() {
        let state = MenuState::new();
        assert_eq!(state.selected_date().unwrap(), None);
    }

    #[test]
    fn test_selected_date_parses_iso_day() {
        let state = MenuState::new();
        state.selected_day_option.set("2025-01-28".to_string());
        assert_eq!(
            state.selected_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 28)
        );
    }

    #[test]
    fn test_unparseable_day_is_stored_but_rejected_on_read() {
        let state = MenuState::new();
        state.selected_day_option.set("next tuesday".to_string());
        assert_eq!(state.selected_day_option.get(), "next tuesday");
        assert!(matches!(
            state.selected_date(),
            Err(MenuError::InvalidDay(day)) if day == "next tuesday"
        ));
    }

    #[test]
    fn test_toggle_and_clear_filters() {
        let state = MenuState::new();
        state.toggle_filter(DietaryRestriction::Halal);
        state.toggle_filter(DietaryRestriction::Vegan);
        assert_eq!(
            state.active_restrictions.get(),
            vec![DietaryRestriction::Vegan, DietaryRestriction::Halal]
        );

        state.clear_filters();
        assert!(state.active_restrictions.get().is_empty());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = MenuState::new();
        state.selected_meal.set("Breakfast".to_string());
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["selectedMeal"], "Breakfast");
        assert_eq!(json["selectedDayOption"], "");
        assert_eq!(json["filters"]["gluten_free"], false);
    }

    #[test]
    fn test_snapshot_to_json_round_trips() {
        let state = MenuState::new();
        state.toggle_filter(DietaryRestriction::Vegan);
        let snapshot = state.snapshot();

        let text = snapshot.to_json().unwrap();
        assert!(text.contains("\"selectedMeal\": \"Lunch\""));
        let parsed: MenuSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
