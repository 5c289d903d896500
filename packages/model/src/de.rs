//! Lenient field decoders.
//!
//! Stored settings come from form inputs, so numbers and flags are often
//! strings (`"4"`, `"true"`). These accept both shapes.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let number = number_from(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))?;

    if !number.is_finite() || number < 0.0 || number > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!("{number} is out of range")));
    }

    Ok(number.trunc() as u32)
}

pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    number_from(&value)
        .filter(|n| n.is_finite())
        .ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))
}

pub(crate) fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" => Ok(false),
        _ => Err(D::Error::custom(format!("expected a boolean, got {value}"))),
    }
}
