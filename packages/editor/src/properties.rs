//! Properties panel write path.
//!
//! Raw input strings from the panel are converted per field kind into a
//! one-key settings patch, which the session applies as an `UpdateSettings`.

use serde_json::{json, Value};
use storeblocks_model::catalog::{self, FieldKind};
use storeblocks_model::{normalize_hex, BuilderElement, SettingsMap};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("{element_type} has no property {key}")]
    UnknownField { element_type: String, key: String },

    #[error("{key} expects a number, got {value:?}")]
    NotANumber { key: String, value: String },

    #[error("{key} must be one of {options:?}")]
    NotAnOption { key: String, options: Vec<String> },

    #[error("{key} expects true or false, got {value:?}")]
    NotABoolean { key: String, value: String },
}

/// One-key settings patch for a panel field change
pub fn field_patch(element: &BuilderElement, key: &str, raw: &str) -> Result<SettingsMap, PropertyError> {
    let unknown = || PropertyError::UnknownField {
        element_type: element.type_tag().to_string(),
        key: key.to_string(),
    };

    let element_type = element.element_type().ok_or_else(unknown)?;
    let spec = catalog::field_spec(element_type, key).ok_or_else(unknown)?;

    let value = match spec.kind {
        FieldKind::Text | FieldKind::TextArea | FieldKind::Url | FieldKind::Code => {
            Value::String(raw.to_string())
        }

        FieldKind::Color => Value::String(normalize_hex(raw).unwrap_or_else(|| raw.trim().to_string())),

        FieldKind::Number { min, max, step } => {
            let number: f64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|n: &f64| n.is_finite())
                .ok_or_else(|| PropertyError::NotANumber {
                    key: key.to_string(),
                    value: raw.to_string(),
                })?;

            let clamped = number.clamp(min, max);
            if step.fract() == 0.0 {
                json!(clamped.round() as i64)
            } else {
                json!(clamped)
            }
        }

        FieldKind::Toggle => match raw.trim() {
            "true" | "on" => Value::Bool(true),
            "false" | "off" | "" => Value::Bool(false),
            _ => {
                return Err(PropertyError::NotABoolean {
                    key: key.to_string(),
                    value: raw.to_string(),
                })
            }
        },

        FieldKind::Select(options) => {
            if !options.contains(&raw) {
                return Err(PropertyError::NotAnOption {
                    key: key.to_string(),
                    options: options.iter().map(|o| o.to_string()).collect(),
                });
            }
            Value::String(raw.to_string())
        }
    };

    let mut patch = SettingsMap::new();
    patch.insert(key.to_string(), value);
    Ok(patch)
}
