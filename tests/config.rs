use pagelift::config::Config;
use pagelift::constants::{DISPLAY_DATETIME_FORMAT, INVALID_DATE_MARKER};
use pagelift::widget::SortDirection;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.selectors.absolute_class, "datetime");
    assert_eq!(config.selectors.relative_class, "datetime-relative");
    assert_eq!(config.selectors.cache_expiry_id, "cacheExpiredAt");
    assert_eq!(config.selectors.table_id, "releases");
    assert_eq!(config.display.datetime_format, DISPLAY_DATETIME_FORMAT);
    assert_eq!(config.table.page_length, 25);
    assert_eq!(config.table.sort_column, 3);
    assert_eq!(config.table.sort_direction, SortDirection::Descending);
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Empty selector name should fail
    config.selectors.absolute_class = String::new();
    assert!(config.validate().is_err());

    // Selector names with CSS metacharacters should fail
    config.selectors.absolute_class = "date.time".to_string();
    assert!(config.validate().is_err());

    // Reset and test overlapping classes
    config.selectors.absolute_class = "datetime-relative".to_string();
    assert!(config.validate().is_err());

    // Reset and test page length bounds
    config.selectors.absolute_class = "datetime".to_string();
    config.table.page_length = 0;
    assert!(config.validate().is_err());
    config.table.page_length = 1000;
    assert!(config.validate().is_err());

    // Reset and test an invalid strftime pattern
    config.table.page_length = 25;
    config.display.datetime_format = "%Y-%m-%d %".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("absolute_class = \"datetime\""));
    assert!(toml_str.contains("page_length = 25"));
    assert!(toml_str.contains("sort_direction = \"desc\""));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[table]
page_length = 50
sort_column = 0
sort_direction = "asc"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.table.page_length, 50);
    assert_eq!(config.table.sort_column, 0);
    assert_eq!(config.table.sort_direction, SortDirection::Ascending);
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.selectors.absolute_class, "datetime"); // default value
    assert_eq!(config.selectors.table_id, "releases"); // default value
    assert_eq!(config.display.datetime_format, DISPLAY_DATETIME_FORMAT); // default value
}

#[test]
fn test_invalid_date_marker_is_stable() {
    // The marker is part of the page contract; renaming it changes rendered output
    assert_eq!(INVALID_DATE_MARKER, "Invalid date");
}
