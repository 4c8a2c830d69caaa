//! Settings loading from configuration files.
//!
//! This module loads [`Settings`] from TOML or JSON and applies environment
//! variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults, key by key).
//! 3. Apply environment variable overrides (highest priority).
//! 4. Reject settings the form controller cannot work with.
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `SHOWROOM_DEBUG` | `debug` |
//! | `SHOWROOM_LOG_LEVEL` | `log_level` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use showroom_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/showroom.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/showroom.json").unwrap();
//! ```

use std::path::Path;

use crate::error::ShowroomError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values, including keys
/// nested inside tables such as `[contact.timing]`.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, ShowroomError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| ShowroomError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, ShowroomError> {
    let content = read_config(path.as_ref())?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, ShowroomError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, ShowroomError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| ShowroomError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, ShowroomError> {
    let content = read_config(path.as_ref())?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, ShowroomError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Applies `SHOWROOM_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_with(settings, |key| std::env::var(key).ok());
}

/// Applies overrides read through `lookup` instead of the process environment.
///
/// - `SHOWROOM_DEBUG` -> `debug` ("true"/"1"/"yes" => true, anything else => false)
/// - `SHOWROOM_LOG_LEVEL` -> `log_level`
pub fn apply_overrides_with<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("SHOWROOM_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("SHOWROOM_LOG_LEVEL") {
        settings.log_level = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path) -> Result<String, ShowroomError> {
    tracing::debug!(path = %path.display(), "reading settings file");
    Ok(std::fs::read_to_string(path)?)
}

/// Merges a parsed document over the default settings and validates the result.
fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, ShowroomError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        ShowroomError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    let settings: Settings = serde_json::from_value(merged).map_err(|e| {
        ShowroomError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            log_level = "warn"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "warn");
        // Defaults preserved
        assert_eq!(settings.contact.country.dial, "+91");
    }

    #[test]
    fn test_from_toml_str_nested_timing() {
        let toml = r"
            [contact.timing]
            debounce_ms = 250
        ";

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.contact.timing.debounce_ms, 250);
        assert_eq!(settings.contact.timing.throttle_ms, 3000);
        assert_eq!(settings.contact.message_max_length, 1000);
    }

    #[test]
    fn test_from_toml_str_products() {
        let toml = r#"
            [contact]
            products = ["Choose a vehicle", "Tractor", "Pickup"]
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.contact.products.len(), 3);
        assert_eq!(settings.contact.placeholder(), "Choose a vehicle");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_str_rejects_invalid_settings() {
        let toml = r"
            [contact.country]
            phone_length = 0
        ";
        let err = from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("phone_length"));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "debug": false,
            "log_level": "debug",
            "contact": { "country": { "label": "India", "dial": "+91", "phone_length": 10 } }
        }"#;

        let settings = from_json_str(json).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.contact.products.len(), 5);
    }

    #[test]
    fn test_from_json_str_messages() {
        let json = r#"{"contact": {"messages": {"success": "Got it!"}}}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.contact.messages.success, "Got it!");
        assert_eq!(
            settings.contact.messages.failure,
            "Failed to send. Try again later."
        );
    }

    #[test]
    fn test_from_json_str_empty_object() {
        let settings = from_json_str("{}").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = from_json_str("{invalid json");
        assert!(result.is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("showroom_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test_settings.toml");

        std::fs::write(&path, "debug = false\nlog_level = \"error\"\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "error");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join("showroom_test_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test_settings.json");

        std::fs::write(&path, r#"{"debug": false}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert!(!settings.debug);

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/path/showroom.toml").unwrap_err();
        assert!(
            matches!(err, ShowroomError::IoError(ref e) if e.kind() == std::io::ErrorKind::NotFound)
        );
        assert_eq!(err.code(), "io");
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = from_json_file_with_env("/nonexistent/path/showroom.json");
        assert!(matches!(result, Err(ShowroomError::IoError(_))));
    }

    // ── Overrides ───────────────────────────────────────────────────

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_overrides_debug_true() {
        let mut settings = Settings::default();
        settings.debug = false;
        apply_overrides_with(&mut settings, lookup_from(&[("SHOWROOM_DEBUG", "true")]));
        assert!(settings.debug);
    }

    #[test]
    fn test_overrides_debug_1() {
        let mut settings = Settings::default();
        settings.debug = false;
        apply_overrides_with(&mut settings, lookup_from(&[("SHOWROOM_DEBUG", "1")]));
        assert!(settings.debug);
    }

    #[test]
    fn test_overrides_debug_false() {
        let mut settings = Settings::default();
        apply_overrides_with(&mut settings, lookup_from(&[("SHOWROOM_DEBUG", "off")]));
        assert!(!settings.debug);
    }

    #[test]
    fn test_overrides_log_level() {
        let mut settings = Settings::default();
        apply_overrides_with(
            &mut settings,
            lookup_from(&[("SHOWROOM_LOG_LEVEL", "showroom_forms=debug")]),
        );
        assert_eq!(settings.log_level, "showroom_forms=debug");
    }

    #[test]
    fn test_overrides_absent_keep_values() {
        let mut settings = Settings::default();
        apply_overrides_with(&mut settings, lookup_from(&[]));
        assert_eq!(settings, Settings::default());
    }

    // ── merge_json helper ───────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"outer": {"a": 1, "b": 2}});
        let over = serde_json::json!({"outer": {"b": 3}});
        let merged = merge_json(base, over);
        assert_eq!(merged["outer"]["a"], 1);
        assert_eq!(merged["outer"]["b"], 3);
    }

    #[test]
    fn test_merge_json_array_override() {
        let base = serde_json::json!({"list": [1, 2, 3]});
        let over = serde_json::json!({"list": [4, 5]});
        let merged = merge_json(base, over);
        // Arrays are replaced, not merged
        assert_eq!(merged["list"], serde_json::json!([4, 5]));
    }

    #[test]
    fn test_toml_to_json() {
        let toml_val: toml::Value = toml::from_str(
            r#"
            name = "test"
            count = 42
            flag = true
            [nested]
            key = "value"
        "#,
        )
        .unwrap();

        let json = toml_to_json(toml_val);
        assert_eq!(json["name"], "test");
        assert_eq!(json["count"], 42);
        assert_eq!(json["flag"], true);
        assert_eq!(json["nested"]["key"], "value");
    }
}
