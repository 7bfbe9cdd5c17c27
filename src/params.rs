//! Lenient field decoding for tool parameters.
//!
//! Browser forms send everything as strings, so `{"count": "3"}` has to mean
//! the same as `{"count": 3}`. Use these with `#[serde(deserialize_with)]` on
//! fields of a `#[serde(default)]` struct. A JSON `null` decodes as the
//! type's zero value; anything that is neither a number nor a numeric string
//! is rejected and surfaces as `Invalid request body: …`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

use crate::error::ToolError;

/// Number or numeric string → `f64`. `NaN` and infinities get through here;
/// handlers reject them with [`finite`].
pub fn float<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    d.deserialize_any(FloatVisitor)
}

/// Non-negative integer or integer string → `u32`.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    d.deserialize_any(CountVisitor)
}

/// String, number or bool → `String`.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    d.deserialize_any(TextVisitor)
}

/// Rejects `NaN` and infinities with a validation error naming the field.
pub fn finite(name: &str, value: f64) -> Result<f64, ToolError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ToolError::validation(format!("{name} must be a finite number")))
    }
}

struct FloatVisitor;

impl<'de> Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> { Ok(v as f64) }
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> { Ok(v as f64) }
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> { Ok(v) }
    fn visit_unit<E: de::Error>(self) -> Result<f64, E> { Ok(0.0) }
    fn visit_none<E: de::Error>(self) -> Result<f64, E> { Ok(0.0) }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::custom(format!("could not convert {v:?} to a number")))
    }
}

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or an integer string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
        u32::try_from(v).map_err(|_| E::custom(format!("{v} is not a valid count")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
        u32::try_from(v).map_err(|_| E::custom(format!("{v} is not a valid count")))
    }

    // `6.0` is fine, `6.5` is not.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
        if v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v) {
            Ok(v as u32)
        } else {
            Err(E::custom(format!("{v} is not a valid count")))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<u32, E> { Ok(0) }
    fn visit_none<E: de::Error>(self) -> Result<u32, E> { Ok(0) }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
        v.trim()
            .parse()
            .map_err(|_| E::custom(format!("could not convert {v:?} to an integer")))
    }
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> { Ok(v.to_owned()) }
    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> { Ok(v) }
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> { Ok(v.to_string()) }
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> { Ok(v.to_string()) }
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> { Ok(v.to_string()) }
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> { Ok(v.to_string()) }
    fn visit_unit<E: de::Error>(self) -> Result<String, E> { Ok(String::new()) }
    fn visit_none<E: de::Error>(self) -> Result<String, E> { Ok(String::new()) }
}
