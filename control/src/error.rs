// error.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpopError {
    /// A required argument was empty or missing.
    #[error("Missing required argument: {0}")]
    NullArgument(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The response could not be decoded. The raw response is kept so callers
    /// can inspect what the backend actually sent.
    #[error("Protocol error: {message}")]
    Protocol { message: String, response: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// A bus wait completed without a matching message.
    #[error("Bus wait timed out without a matching message")]
    BusTimeout { response: String },

    #[error("Thread error: {0}")]
    Thread(String),

    #[error("Out of memory: {0}")]
    OutOfMemory(String),

    #[error("Backend error {code}: {description}")]
    Backend {
        code: i64,
        description: String,
        response: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GpopError {
    pub fn protocol(message: impl Into<String>, response: &str) -> Self {
        GpopError::Protocol {
            message: message.into(),
            response: response.to_string(),
        }
    }

    /// Raw backend payload attached to this error, if any.
    pub fn response(&self) -> Option<&str> {
        match self {
            GpopError::Protocol { response, .. }
            | GpopError::BusTimeout { response }
            | GpopError::Backend { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GpopError::BusTimeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, GpopError>;
