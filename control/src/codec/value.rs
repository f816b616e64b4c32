// value.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

//! Typed element property values.
//!
//! Properties travel as text on the command line and in the `value` field of
//! the backend's reply. `PropertyValue` is the closed set of shapes a caller
//! can read or write; the caller names the expected [`ValueKind`] when reading.

use serde::{Deserialize, Serialize};

use crate::error::{GpopError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Integer,
    Float,
    String,
    Boolean,
    Enum,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Enum => write!(f, "enum"),
        }
    }
}

impl std::str::FromStr for ValueKind {
    type Err = GpopError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "integer" | "int" => Ok(ValueKind::Integer),
            "float" | "double" => Ok(ValueKind::Float),
            "string" | "str" => Ok(ValueKind::String),
            "boolean" | "bool" => Ok(ValueKind::Boolean),
            "enum" => Ok(ValueKind::Enum),
            other => Err(GpopError::InvalidArgument(format!(
                "Unknown value kind '{}'. Valid values: integer, float, string, boolean, enum",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    /// Enumeration nick, e.g. `"live"`.
    Enum(String),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Integer(_) => ValueKind::Integer,
            PropertyValue::Float(_) => ValueKind::Float,
            PropertyValue::String(_) => ValueKind::String,
            PropertyValue::Boolean(_) => ValueKind::Boolean,
            PropertyValue::Enum(_) => ValueKind::Enum,
        }
    }

    /// Render the value the way `element_set` expects it on the wire.
    pub fn encode(&self) -> Result<String> {
        match self {
            PropertyValue::Integer(v) => Ok(v.to_string()),
            PropertyValue::Float(v) => {
                if !v.is_finite() {
                    return Err(GpopError::InvalidArgument(format!(
                        "Float property value must be finite, got {}",
                        v
                    )));
                }
                Ok(v.to_string())
            }
            PropertyValue::Boolean(v) => Ok(if *v { "true" } else { "false" }.to_string()),
            PropertyValue::String(v) => {
                if v.trim().is_empty() {
                    return Err(GpopError::InvalidArgument(
                        "String property value cannot be empty".to_string(),
                    ));
                }
                Ok(v.clone())
            }
            PropertyValue::Enum(v) => {
                if v.trim().is_empty() || v.contains(char::is_whitespace) {
                    return Err(GpopError::InvalidArgument(format!(
                        "Enum property value must be a single nick, got '{}'",
                        v
                    )));
                }
                Ok(v.clone())
            }
        }
    }

    /// Parse the textual `value` returned by `element_get` as `kind`.
    pub fn decode(kind: ValueKind, text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let mismatch = || {
            GpopError::InvalidArgument(format!(
                "Property value '{}' is not a valid {}",
                text, kind
            ))
        };

        match kind {
            ValueKind::Integer => trimmed
                .parse::<i64>()
                .map(PropertyValue::Integer)
                .map_err(|_| mismatch()),
            ValueKind::Float => trimmed
                .parse::<f64>()
                .map(PropertyValue::Float)
                .map_err(|_| mismatch()),
            ValueKind::Boolean => match trimmed.to_lowercase().as_str() {
                "true" | "1" => Ok(PropertyValue::Boolean(true)),
                "false" | "0" => Ok(PropertyValue::Boolean(false)),
                _ => Err(mismatch()),
            },
            ValueKind::String => Ok(PropertyValue::String(text.to_string())),
            ValueKind::Enum => {
                if trimmed.is_empty() {
                    Err(mismatch())
                } else {
                    Ok(PropertyValue::Enum(trimmed.to_string()))
                }
            }
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Integer(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::String(v) | PropertyValue::Enum(v) => write!(f, "{}", v),
            PropertyValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Integer(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Boolean(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}
