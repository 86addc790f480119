//! Flat JSON payload loader with type coercion

use serde_json::Value;

use super::error::{ConfigParseError, ConfigResult};
use super::value::{AppConfig, ConfigValue};

/// Load a configuration payload handed over by the host
///
/// The payload is a flat JSON object whose values are normally strings.
/// Each string entry is coerced independently (see [`ConfigValue::coerce`]).
/// Values that are already typed (JSON booleans and integers, e.g. from
/// [`AppConfig::to_payload`]) are kept as they are, floats keep their
/// textual form and `null` entries are skipped.
///
/// An empty string is the host's fallback when fetching the payload failed
/// and produces an empty config. Any other payload that is not a flat JSON
/// object is an error.
///
/// # Arguments
/// * `raw` - Payload as returned by the host's `config_values` call
///
/// # Example
///
/// ```ignore
/// let config = load(r#"{"filter_download_isrc": "true", "port": "8080"}"#)?;
/// assert!(config.flag("filter_download_isrc"));
/// assert_eq!(config.integer("port"), Some(8080));
/// ```
pub fn load(raw: &str) -> ConfigResult<AppConfig> {
    if raw.is_empty() {
        log::debug!("load: Empty payload, using empty config");
        return Ok(AppConfig::new());
    }

    let object = match serde_json::from_str::<Value>(raw)? {
        Value::Object(object) => object,
        other => {
            return Err(ConfigParseError::NotAnObject {
                found: json_kind(&other),
            })
        }
    };

    let mut config = AppConfig::new();
    for (key, value) in object {
        let coerced = match value {
            Value::String(s) => ConfigValue::coerce(&s),
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::String(n.to_string()),
            },
            Value::Null => {
                log::debug!("load: Skipping null entry '{}'", key);
                continue;
            }
            nested @ (Value::Array(_) | Value::Object(_)) => {
                return Err(ConfigParseError::NestedValue {
                    key,
                    found: json_kind(&nested),
                })
            }
        };
        config.set(key, coerced);
    }

    log::info!("load: Loaded {} configuration entries", config.len());
    Ok(config)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
