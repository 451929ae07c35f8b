//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

fn clear_env() {
    env::remove_var(CONFIG_ENV);
    env::remove_var(FOLLOW_ENV);
    env::remove_var(DEMO_RATE_ENV);
}

// ===== Paths =====

#[test]
fn default_config_path_contains_lcv_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("lcv") && path_str.ends_with("config.toml"),
        "Path should contain 'lcv' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_lcv_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("lcv.log"),
        "Default log path should end with 'lcv.log', got: {:?}",
        path
    );
}

// ===== Loading =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = write_temp_config(
        "lcv_test_config_valid.toml",
        r#"
min_row_height = 2.0
follow = false
empty_placeholder = false
rearm_threshold = 3.5
demo_rate = 4
tick_ms = 100
log_file_path = "/tmp/lcv-test.log"
"#,
    );

    let config = load_config_file(&path)
        .expect("Should parse valid TOML")
        .expect("Should return Some for existing file");

    assert_eq!(config.min_row_height, Some(2.0));
    assert_eq!(config.follow, Some(false));
    assert_eq!(config.empty_placeholder, Some(false));
    assert_eq!(config.rearm_threshold, Some(3.5));
    assert_eq!(config.demo_rate, Some(4));
    assert_eq!(config.tick_ms, Some(100));
    assert_eq!(config.log_file_path, Some(PathBuf::from("/tmp/lcv-test.log")));

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = write_temp_config("lcv_test_config_invalid.toml", "follow = = true");

    let result = load_config_file(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let path = write_temp_config("lcv_test_config_unknown.toml", "theme = \"dark\"\n");

    let result = load_config_file(&path);
    match result {
        Err(ConfigError::ParseError { reason, .. }) => assert!(reason.contains("theme")),
        other => panic!("expected parse error, got {:?}", other),
    }

    fs::remove_file(path).ok();
}

#[test]
fn empty_file_yields_all_none() {
    let path = write_temp_config("lcv_test_config_empty.toml", "");

    let config = load_config_file(&path).expect("empty file parses");
    assert_eq!(config, Some(ConfigFile::default()));

    fs::remove_file(path).ok();
}

// ===== Precedence =====

#[test]
#[serial(lcv_env)]
fn explicit_path_beats_env_var() {
    clear_env();
    let explicit = write_temp_config("lcv_test_config_explicit.toml", "demo_rate = 7\n");
    let from_env = write_temp_config("lcv_test_config_env.toml", "demo_rate = 9\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("loads")
        .expect("exists");
    assert_eq!(config.demo_rate, Some(7));

    clear_env();
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(lcv_env)]
fn env_var_path_is_used_without_explicit_path() {
    clear_env();
    let from_env = write_temp_config("lcv_test_config_env_only.toml", "tick_ms = 40\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(None)
        .expect("loads")
        .expect("exists");
    assert_eq!(config.tick_ms, Some(40));

    clear_env();
    fs::remove_file(from_env).ok();
}

// ===== Merging =====

#[test]
fn merge_without_file_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_keeps_defaults_for_unset_fields() {
    let file = ConfigFile {
        follow: Some(false),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();

    assert!(!resolved.follow);
    assert_eq!(resolved.min_row_height, defaults.min_row_height);
    assert_eq!(resolved.demo_rate, defaults.demo_rate);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
fn config_file_log_path_overrides_default() {
    let custom_path = PathBuf::from("/custom/path/to/app.log");
    let file = ConfigFile {
        log_file_path: Some(custom_path.clone()),
        ..ConfigFile::default()
    };

    assert_eq!(merge_config(Some(file)).log_file_path, custom_path);
}

#[test]
#[serial(lcv_env)]
fn env_overrides_follow_and_rate() {
    clear_env();
    env::set_var(FOLLOW_ENV, "off");
    env::set_var(DEMO_RATE_ENV, "12");

    let config = apply_env_overrides(ResolvedConfig::default());
    assert!(!config.follow);
    assert_eq!(config.demo_rate, 12);

    clear_env();
}

#[test]
#[serial(lcv_env)]
fn unparsable_env_values_are_ignored() {
    clear_env();
    env::set_var(FOLLOW_ENV, "maybe");
    env::set_var(DEMO_RATE_ENV, "-3");

    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config, ResolvedConfig::default());

    clear_env();
}

#[test]
fn cli_overrides_take_precedence() {
    let base = ResolvedConfig {
        follow: true,
        demo_rate: 3,
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(base, Some(false), Some(8), Some(2.0));
    assert!(!config.follow);
    assert_eq!(config.demo_rate, 8);
    assert_eq!(config.min_row_height, 2.0);
}

#[test]
fn cli_without_flags_changes_nothing() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None, None), base);
}

// ===== Validation =====

#[test]
fn default_config_is_valid() {
    assert_eq!(ResolvedConfig::default().validate(), Ok(()));
}

#[test]
fn non_positive_row_height_is_rejected() {
    for height in [0.0, -1.0, f64::NAN] {
        let config = ResolvedConfig {
            min_row_height: height,
            ..ResolvedConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "min_row_height",
                ..
            })
        ));
    }
}

#[test]
fn zero_tick_is_rejected() {
    let config = ResolvedConfig {
        tick_ms: 0,
        ..ResolvedConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn layout_options_mirror_config() {
    let config = ResolvedConfig {
        min_row_height: 2.0,
        follow: false,
        empty_placeholder: false,
        rearm_threshold: Some(5.0),
        ..ResolvedConfig::default()
    };

    let options = config.layout_options();
    assert_eq!(options.min_row_height, 2.0);
    assert!(!options.auto_scroll);
    assert!(!options.empty_placeholder);
    assert_eq!(options.rearm_distance(), 5.0);
}
