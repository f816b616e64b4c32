// event.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::error::GpopError;

/// Pipeline state as reported by `read /pipelines/<name>/state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    /// Pipeline is in void/pending state (transitioning)
    VoidPending,
    Null,
    Ready,
    Paused,
    Playing,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::VoidPending => write!(f, "void_pending"),
            PipelineState::Null => write!(f, "null"),
            PipelineState::Ready => write!(f, "ready"),
            PipelineState::Paused => write!(f, "paused"),
            PipelineState::Playing => write!(f, "playing"),
        }
    }
}

impl std::str::FromStr for PipelineState {
    type Err = GpopError;

    // The backend reports GStreamer nicks in upper case ("PLAYING").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "void_pending" | "voidpending" | "void-pending" => Ok(PipelineState::VoidPending),
            "null" => Ok(PipelineState::Null),
            "ready" => Ok(PipelineState::Ready),
            "paused" => Ok(PipelineState::Paused),
            "playing" => Ok(PipelineState::Playing),
            other => Err(GpopError::InvalidArgument(format!(
                "Invalid state '{}'. Valid values: null, ready, paused, playing",
                other
            ))),
        }
    }
}
