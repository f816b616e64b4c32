// response.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

//! Decoding of the backend's JSON replies.
//!
//! Replies come wrapped in an envelope:
//!
//! ```json
//! { "code": 0, "description": "Success", "response": { ... } }
//! ```
//!
//! Field lookups try the root object first and then the `response` object,
//! so both the envelope and a bare payload decode the same way.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GpopError, Result};

/// Envelope code for a successful command.
pub const CODE_OK: i64 = 0;

/// Envelope code the backend uses when the addressed resource does not exist.
pub const CODE_NO_RESOURCE: i64 = 4;

/// Field carrying the payload of the envelope, null when a bus read timed out.
pub const RESPONSE_FIELD: &str = "response";

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    description: Option<String>,
}

fn parse(response: &str) -> Result<Value> {
    serde_json::from_str(response)
        .map_err(|e| GpopError::protocol(format!("malformed response: {}", e), response))
}

fn lookup<'a>(root: &'a Value, field: &str) -> Option<&'a Value> {
    root.get(field).or_else(|| {
        root.get(RESPONSE_FIELD)
            .filter(|inner| inner.is_object())
            .and_then(|inner| inner.get(field))
    })
}

fn missing(field: &str, response: &str) -> GpopError {
    GpopError::protocol(format!("field '{}' not found", field), response)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Map a non-zero envelope code to an error.
///
/// Responses that are not a JSON envelope pass through untouched; some
/// commands (graphs, raw reads) reply with plain text.
pub fn check_envelope(response: &str) -> Result<()> {
    let envelope = match serde_json::from_str::<Envelope>(response) {
        Ok(envelope) => envelope,
        Err(_) => return Ok(()),
    };

    match envelope.code {
        CODE_OK => Ok(()),
        CODE_NO_RESOURCE => Err(GpopError::NotFound(
            envelope
                .description
                .unwrap_or_else(|| "Resource not found".to_string()),
        )),
        code => Err(GpopError::Backend {
            code,
            description: envelope.description.unwrap_or_default(),
            response: response.to_string(),
        }),
    }
}

/// Textual value of the scalar field `field`.
pub fn child_string(response: &str, field: &str) -> Result<String> {
    check_envelope(response)?;
    let root = parse(response)?;
    let value = lookup(&root, field).ok_or_else(|| missing(field, response))?;

    scalar_text(value).ok_or_else(|| {
        GpopError::protocol(format!("field '{}' is not a scalar", field), response)
    })
}

/// Collect `element` out of every object in the array `container`, in order.
pub fn child_string_array(response: &str, container: &str, element: &str) -> Result<Vec<String>> {
    check_envelope(response)?;
    let root = parse(response)?;
    let nodes = lookup(&root, container)
        .ok_or_else(|| missing(container, response))?
        .as_array()
        .ok_or_else(|| {
            GpopError::protocol(format!("field '{}' is not an array", container), response)
        })?;

    nodes
        .iter()
        .map(|node| {
            node.get(element)
                .and_then(scalar_text)
                .ok_or_else(|| missing(element, response))
        })
        .collect()
}

/// Whether `field` is present and null.
pub fn is_null(response: &str, field: &str) -> Result<bool> {
    check_envelope(response)?;
    let root = parse(response)?;
    lookup(&root, field)
        .map(Value::is_null)
        .ok_or_else(|| missing(field, response))
}

/// Classify the reply of a bus read.
///
/// A non-null `response` is a bus message and yields the raw payload, a null
/// one means the backend's timeout elapsed first. Either way the payload is
/// handed back to the caller. A failure code other than "no such resource"
/// is reported as [`GpopError::Protocol`], still carrying the payload.
pub fn bus_outcome(response: Result<String>) -> Result<String> {
    let payload = match response {
        Ok(payload) => payload,
        Err(GpopError::Backend {
            code,
            description,
            response,
        }) => {
            return Err(GpopError::Protocol {
                message: format!("bus read failed with code {}: {}", code, description),
                response,
            })
        }
        Err(e) => return Err(e),
    };
    if is_null(&payload, RESPONSE_FIELD)? {
        Err(GpopError::BusTimeout { response: payload })
    } else {
        Ok(payload)
    }
}
