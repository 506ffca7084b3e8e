use navtree::config::{Config, ConfigError};
use navtree::demo::DemoSettings;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.state.path.is_none());
    assert!(config.state.restore);
    assert_eq!(config.countdown.ticks, 10);
    assert_eq!(config.countdown.interval_ms, 1000);
    assert!(config.carousel.animate);
    assert_eq!(config.carousel.steps, 6);
    assert_eq!(config.carousel.step_ms, 40);
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    assert!(Config::config_path().ends_with("navtree/config.toml"));
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = write_config(
        r#"
[state]
path = "/tmp/navtree-state.json"
restore = false

[countdown]
ticks = 5
interval_ms = 200

[carousel]
animate = false
steps = 3
step_ms = 16

[ui]
tick_rate_ms = 100
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.state_path(), PathBuf::from("/tmp/navtree-state.json"));
    assert!(!config.state.restore);

    let settings = DemoSettings::from(&config);
    assert_eq!(settings.countdown.ticks, 5);
    assert_eq!(settings.countdown.interval, Duration::from_millis(200));
    assert!(!settings.animate_carousel);
    assert_eq!(settings.transition.steps, 3);
    assert_eq!(settings.transition.step, Duration::from_millis(16));
}

#[test]
fn test_state_path_defaults_to_data_dir() {
    let config = Config::default();
    assert!(config.state_path().ends_with("navtree/state.json"));
}

#[test]
fn test_zero_interval_fails_validation() {
    let (_dir, path) = write_config("[countdown]\ninterval_ms = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    match err {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("countdown.interval_ms"));
        }
        other => panic!("Expected ValidationError, got {other}"),
    }
}

#[test]
fn test_wrong_type_is_parse_error() {
    let (_dir, path) = write_config("[ui]\ntick_rate_ms = \"fast\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}
