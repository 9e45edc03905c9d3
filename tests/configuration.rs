//! Tests for configuration system

use imkitchen_menu::{MenuConfig, MenuState};
use temp_dir::TempDir;

#[test]
fn test_config_loads_defaults() {
    let config = MenuConfig::load(None).expect("Failed to load config");

    assert_eq!(config.defaults.selected_meal, "Lunch");
    assert_eq!(config.defaults.selected_day, "");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "pretty");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("menu.toml");
    std::fs::write(
        &path,
        r#"
[defaults]
selected_meal = "Breakfast"
selected_day = "2025-01-28"

[logging]
format = "json"
"#,
    )
    .unwrap();

    let config = MenuConfig::load(Some(path.to_string_lossy().into_owned()))
        .expect("Failed to load config");

    assert_eq!(config.defaults.selected_meal, "Breakfast");
    assert_eq!(config.defaults.selected_day, "2025-01-28");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());

    let state = MenuState::from_defaults(&config.defaults);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.selected_meal, "Breakfast");
    assert_eq!(snapshot.selected_day_option, "2025-01-28");
}

#[test]
fn test_config_file_with_invalid_day_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("menu.toml");
    std::fs::write(&path, "[defaults]\nselected_day = \"tomorrow\"\n").unwrap();

    let config = MenuConfig::load(Some(path.to_string_lossy().into_owned()))
        .expect("Failed to load config");

    assert!(config.validate().is_err());
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let config = MenuConfig::load(Some("does/not/exist.toml".to_string()))
        .expect("Failed to load config");

    assert_eq!(config.defaults.selected_meal, "Lunch");
}

#[test]
fn test_environment_overrides_file_and_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("menu.toml");
    std::fs::write(
        &path,
        "[defaults]\nselected_meal = \"Dinner\"\nselected_day = \"2025-01-28\"\n",
    )
    .unwrap();

    let env_vars = [
        ("IMKITCHEN_MENU__DEFAULTS__SELECTED_MEAL", "Breakfast"),
        ("IMKITCHEN_MENU__LOGGING__LEVEL", "debug"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();

    let config =
        MenuConfig::load_with_env(Some(path.to_string_lossy().into_owned()), Some(env_vars))
            .expect("Failed to load config");

    // Environment beats the file
    assert_eq!(config.defaults.selected_meal, "Breakfast");
    // Environment beats the built-in default
    assert_eq!(config.logging.level, "debug");
    // Untouched keys still come from the file
    assert_eq!(config.defaults.selected_day, "2025-01-28");
}
