// command.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

//! Line-oriented command encoding.
//!
//! Every request the manager sends is one line of space separated tokens,
//! the first token naming the action. The exact textual form is the wire
//! contract with existing backends, numeric fields included.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::value::PropertyValue;
use crate::bus::BusTimeout;
use crate::error::{GpopError, Result};

/// Seek position format (`GstFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekFormat {
    Undefined = 0,
    Default = 1,
    Bytes = 2,
    Time = 3,
    Buffers = 4,
    Percent = 5,
}

/// How a seek boundary is interpreted (`GstSeekType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekType {
    None = 0,
    Set = 1,
    End = 2,
}

/// Seek flag bits (`GstSeekFlags`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeekFlags(pub u32);

impl SeekFlags {
    pub const NONE: SeekFlags = SeekFlags(0);
    pub const FLUSH: SeekFlags = SeekFlags(1 << 0);
    pub const ACCURATE: SeekFlags = SeekFlags(1 << 1);
    pub const KEY_UNIT: SeekFlags = SeekFlags(1 << 2);
    pub const SEGMENT: SeekFlags = SeekFlags(1 << 3);

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl std::ops::BitOr for SeekFlags {
    type Output = SeekFlags;

    fn bitor(self, rhs: SeekFlags) -> SeekFlags {
        SeekFlags(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seek {
    pub rate: f64,
    pub format: SeekFormat,
    pub flags: SeekFlags,
    pub start_type: SeekType,
    pub start: i64,
    pub stop_type: SeekType,
    pub stop: i64,
}

impl Default for Seek {
    fn default() -> Self {
        Self {
            rate: 1.0,
            format: SeekFormat::Time,
            flags: SeekFlags::FLUSH,
            start_type: SeekType::Set,
            start: 0,
            stop_type: SeekType::Set,
            stop: -1,
        }
    }
}

impl Seek {
    /// Flushing seek to `position_ns` at normal rate.
    pub fn to_position(position_ns: i64) -> Self {
        Self {
            start: position_ns,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum Command<'a> {
    PipelineCreate {
        name: &'a str,
        description: &'a str,
    },
    PipelineDelete(&'a str),
    PipelinePlay(&'a str),
    PipelinePause(&'a str),
    PipelineStop(&'a str),
    PipelineList,
    PipelineGetGraph(&'a str),
    PipelineVerbose {
        pipeline: &'a str,
        enable: bool,
    },
    PipelineGetState(&'a str),
    ListElements(&'a str),
    ListProperties {
        pipeline: &'a str,
        element: &'a str,
    },
    ListSignals {
        pipeline: &'a str,
        element: &'a str,
    },
    ElementGet {
        pipeline: &'a str,
        element: &'a str,
        property: &'a str,
    },
    ElementSet {
        pipeline: &'a str,
        element: &'a str,
        property: &'a str,
        value: &'a PropertyValue,
    },
    Eos(&'a str),
    FlushStart(&'a str),
    FlushStop {
        pipeline: &'a str,
        reset: bool,
    },
    Seek {
        pipeline: &'a str,
        seek: &'a Seek,
    },
    BusFilter {
        pipeline: &'a str,
        filter: &'a str,
    },
    BusTimeout {
        pipeline: &'a str,
        timeout: BusTimeout,
    },
    BusRead(&'a str),
    SignalTimeout {
        pipeline: &'a str,
        element: &'a str,
        signal: &'a str,
        timeout: i32,
    },
    SignalConnect {
        pipeline: &'a str,
        element: &'a str,
        signal: &'a str,
    },
    SignalDisconnect {
        pipeline: &'a str,
        element: &'a str,
        signal: &'a str,
    },
    DebugEnable(bool),
    DebugThreshold(&'a str),
    DebugColor(bool),
    DebugReset(bool),
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// A token that must be present and must not split on whitespace.
fn token<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(GpopError::InvalidArgument(format!("{} cannot be empty", what)));
    }
    if value.contains(char::is_whitespace) {
        return Err(GpopError::InvalidArgument(format!(
            "{} cannot contain whitespace: '{}'",
            what, value
        )));
    }
    Ok(value)
}

/// Free-form trailing text (descriptions, property values).
fn text<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(GpopError::InvalidArgument(format!("{} cannot be empty", what)));
    }
    if value.contains(&['\n', '\r', '\0'][..]) {
        return Err(GpopError::InvalidArgument(format!(
            "{} cannot span multiple lines",
            what
        )));
    }
    Ok(value)
}

impl Command<'_> {
    /// Name of the action, i.e. the first token on the line.
    pub fn action(&self) -> &'static str {
        match self {
            Command::PipelineCreate { .. } => "pipeline_create",
            Command::PipelineDelete(_) => "pipeline_delete",
            Command::PipelinePlay(_) => "pipeline_play",
            Command::PipelinePause(_) => "pipeline_pause",
            Command::PipelineStop(_) => "pipeline_stop",
            Command::PipelineList => "list_pipelines",
            Command::PipelineGetGraph(_) => "pipeline_get_graph",
            Command::PipelineVerbose { .. } => "pipeline_verbose",
            Command::PipelineGetState(_) => "read",
            Command::ListElements(_) => "list_elements",
            Command::ListProperties { .. } => "list_properties",
            Command::ListSignals { .. } => "list_signals",
            Command::ElementGet { .. } => "element_get",
            Command::ElementSet { .. } => "element_set",
            Command::Eos(_) => "event_eos",
            Command::FlushStart(_) => "event_flush_start",
            Command::FlushStop { .. } => "event_flush_stop",
            Command::Seek { .. } => "event_seek",
            Command::BusFilter { .. } => "bus_filter",
            Command::BusTimeout { .. } => "bus_timeout",
            Command::BusRead(_) => "bus_read",
            Command::SignalTimeout { .. } => "signal_timeout",
            Command::SignalConnect { .. } => "signal_connect",
            Command::SignalDisconnect { .. } => "signal_disconnect",
            Command::DebugEnable(_) => "debug_enable",
            Command::DebugThreshold(_) => "debug_threshold",
            Command::DebugColor(_) => "debug_color",
            Command::DebugReset(_) => "debug_reset",
        }
    }

    /// Format the command line.
    pub fn encode(&self) -> Result<String> {
        let args = self.arguments()?;

        let len = args.iter().map(|a| a.len() + 1).sum::<usize>() + self.action().len();
        let mut line = String::new();
        line.try_reserve(len).map_err(|e| {
            GpopError::OutOfMemory(format!("cannot encode '{}': {}", self.action(), e))
        })?;

        line.push_str(self.action());
        for arg in &args {
            line.push(' ');
            line.push_str(arg);
        }
        Ok(line)
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let args = match self {
            Command::PipelineCreate { name, description } => vec![
                token(name, "Pipeline name")?.to_string(),
                text(description, "Pipeline description")?.to_string(),
            ],
            Command::PipelineDelete(name)
            | Command::PipelinePlay(name)
            | Command::PipelinePause(name)
            | Command::PipelineStop(name)
            | Command::PipelineGetGraph(name)
            | Command::ListElements(name)
            | Command::Eos(name)
            | Command::FlushStart(name)
            | Command::BusRead(name) => vec![token(name, "Pipeline name")?.to_string()],
            Command::PipelineList => Vec::new(),
            Command::PipelineVerbose { pipeline, enable } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                flag(*enable).to_string(),
            ],
            Command::PipelineGetState(name) => vec![format!(
                "/pipelines/{}/state",
                token(name, "Pipeline name")?
            )],
            Command::ListProperties { pipeline, element }
            | Command::ListSignals { pipeline, element } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                token(element, "Element name")?.to_string(),
            ],
            Command::ElementGet {
                pipeline,
                element,
                property,
            } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                token(element, "Element name")?.to_string(),
                token(property, "Property name")?.to_string(),
            ],
            Command::ElementSet {
                pipeline,
                element,
                property,
                value,
            } => {
                let encoded = value.encode()?;
                vec![
                    token(pipeline, "Pipeline name")?.to_string(),
                    token(element, "Element name")?.to_string(),
                    token(property, "Property name")?.to_string(),
                    text(&encoded, "Property value")?.to_string(),
                ]
            }
            Command::FlushStop { pipeline, reset } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                flag(*reset).to_string(),
            ],
            Command::Seek { pipeline, seek } => {
                if !seek.rate.is_finite() {
                    return Err(GpopError::InvalidArgument(format!(
                        "Seek rate must be finite, got {}",
                        seek.rate
                    )));
                }
                let mut numbers = String::new();
                // Rate always carries six decimals, independent of locale.
                write!(
                    numbers,
                    "{:.6} {} {} {} {} {} {}",
                    seek.rate,
                    seek.format as i32,
                    seek.flags.bits(),
                    seek.start_type as i32,
                    seek.start,
                    seek.stop_type as i32,
                    seek.stop
                )
                .map_err(|e| GpopError::InvalidArgument(e.to_string()))?;
                vec![token(pipeline, "Pipeline name")?.to_string(), numbers]
            }
            Command::BusFilter { pipeline, filter } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                token(filter, "Bus filter")?.to_string(),
            ],
            Command::BusTimeout { pipeline, timeout } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                timeout.as_nanos().to_string(),
            ],
            Command::SignalTimeout {
                pipeline,
                element,
                signal,
                timeout,
            } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                token(element, "Element name")?.to_string(),
                token(signal, "Signal name")?.to_string(),
                timeout.to_string(),
            ],
            Command::SignalConnect {
                pipeline,
                element,
                signal,
            }
            | Command::SignalDisconnect {
                pipeline,
                element,
                signal,
            } => vec![
                token(pipeline, "Pipeline name")?.to_string(),
                token(element, "Element name")?.to_string(),
                token(signal, "Signal name")?.to_string(),
            ],
            Command::DebugEnable(v) | Command::DebugColor(v) | Command::DebugReset(v) => {
                vec![flag(*v).to_string()]
            }
            Command::DebugThreshold(threshold) => {
                vec![token(threshold, "Debug threshold")?.to_string()]
            }
        };
        Ok(args)
    }
}
