//! Filename templates
//!
//! A template is free text with `%name%` placeholders, e.g.
//! `"%artist% - %title% (%date%)"`. Rendering substitutes every recognized
//! placeholder with the formatted field of a [`TrackRecord`] and then
//! replaces characters that are illegal in filenames with spaces.
//!
//! ## Placeholders
//!
//! `%title%`, `%album%`, `%artist%`, `%genre%`, `%duration%`, `%date%`,
//! `%composer%`, `%isrc%`, `%copyright%`, `%bitDepth%`, `%samplingRate%`
//!
//! Unknown placeholders are kept as literal text. Substituted values are
//! never scanned again, so a title that reads `%artist%` stays as it is.

use thiserror::Error;

use crate::config::{AppConfig, ConfigValue};
use crate::track::{TrackField, TrackRecord};

/// Characters replaced by a space in rendered filenames
pub const ILLEGAL_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Delimiter around placeholder names
const DELIMITER: char = '%';

/// Errors for templates that are not text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template value is not a string
    #[error("Filename template must be a string, found {found}")]
    InvalidTemplate { found: &'static str },
}

/// A filename template string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate(String);

impl FilenameTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render this template for a record
    pub fn render(&self, record: &TrackRecord) -> String {
        render(&self.0, record)
    }

    /// Template stored under `key` in the config
    ///
    /// A template the loader coerced to a boolean or integer (or a missing
    /// key) is not usable as text.
    pub fn from_config(config: &AppConfig, key: &str) -> Result<Self, TemplateError> {
        match config.get(key) {
            Some(value) => Self::try_from(value),
            None => Err(TemplateError::InvalidTemplate { found: "nothing" }),
        }
    }

    /// Placeholders referenced by this template, in order of appearance
    pub fn placeholders(&self) -> Vec<TrackField> {
        let mut fields = Vec::new();
        scan(&self.0, |segment| {
            if let Segment::Placeholder(field) = segment {
                fields.push(field);
            }
        });
        fields
    }
}

impl From<&str> for FilenameTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl TryFrom<&ConfigValue> for FilenameTemplate {
    type Error = TemplateError;

    fn try_from(value: &ConfigValue) -> Result<Self, Self::Error> {
        match value {
            ConfigValue::String(s) => Ok(Self::new(s.clone())),
            other => Err(TemplateError::InvalidTemplate { found: other.kind() }),
        }
    }
}

/// Render a template for a record
///
/// Never fails: missing fields render empty and unknown placeholders stay
/// literal. The illegal-character pass runs after substitution, so field
/// values are cleaned as well as the literal text.
///
/// # Arguments
/// * `template` - Template text with `%name%` placeholders
/// * `record` - Track whose fields fill the placeholders
///
/// # Example
///
/// ```ignore
/// let record = TrackRecord::new("One More Time").with_artist("Daft Punk");
/// assert_eq!(render("%artist%: %title%", &record), "Daft Punk  One More Time");
/// ```
pub fn render(template: &str, record: &TrackRecord) -> String {
    let mut output = String::with_capacity(template.len());
    scan(template, |segment| match segment {
        Segment::Literal(text) => output.push_str(text),
        Segment::Placeholder(field) => output.push_str(&field.format(record)),
    });
    sanitize_filename(&output)
}

/// Render a template received as untyped JSON from the host
pub fn render_value(
    template: &serde_json::Value,
    record: &TrackRecord,
) -> Result<String, TemplateError> {
    match template {
        serde_json::Value::String(s) => Ok(render(s, record)),
        serde_json::Value::Null => Err(TemplateError::InvalidTemplate { found: "null" }),
        serde_json::Value::Bool(_) => Err(TemplateError::InvalidTemplate { found: "boolean" }),
        serde_json::Value::Number(_) => Err(TemplateError::InvalidTemplate { found: "number" }),
        serde_json::Value::Array(_) => Err(TemplateError::InvalidTemplate { found: "array" }),
        serde_json::Value::Object(_) => Err(TemplateError::InvalidTemplate { found: "object" }),
    }
}

/// Replace every filesystem-illegal character with a single space
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_FILENAME_CHARS.contains(&c) { ' ' } else { c })
        .collect()
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(TrackField),
}

/// Split a template into literal text and recognized placeholders
///
/// A `%` only opens a placeholder when the text up to the next `%` is a
/// known field key. Otherwise the `%` is literal and scanning resumes right
/// after it, so the closing `%` may still open a later placeholder.
fn scan<'a>(template: &'a str, mut emit: impl FnMut(Segment<'a>)) {
    let mut rest = template;

    while let Some(open) = rest.find(DELIMITER) {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(DELIMITER) else {
            break;
        };

        let name = &after_open[..close];
        match TrackField::from_key(name) {
            Some(field) => {
                if open > 0 {
                    emit(Segment::Literal(&rest[..open]));
                }
                emit(Segment::Placeholder(field));
                rest = &after_open[close + 1..];
            }
            None => {
                log::trace!("scan: '%{}%' is not a placeholder, keeping literal", name);
                emit(Segment::Literal(&rest[..open + 1]));
                rest = after_open;
            }
        }
    }

    if !rest.is_empty() {
        emit(Segment::Literal(rest));
    }
}
