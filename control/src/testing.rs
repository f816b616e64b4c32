// testing.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

//! Scripted session used by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::error::{GpopError, Result};
use crate::session::{Session, SinkCallback, SinkHandlerId};

pub const OK_REPLY: &str = r#"{"code":0,"description":"Success","response":{}}"#;

pub const EOS_REPLY: &str = r#"{"code":0,"description":"Success","response":{"type":"eos","source":"pipe","timestamp":"99:99:99.999999999","seqnum":1276}}"#;

pub const TIMEOUT_REPLY: &str = r#"{"code":0,"description":"Success","response":null}"#;

pub const CORRUPTED_REPLY: &str = r#"{"code":0,"description":"Success","resp":null}"#;

struct Script {
    prefix: String,
    reply: std::result::Result<String, String>,
    delay: Duration,
}

struct Sink {
    pipeline: String,
    sink: String,
    callback: SinkCallback,
}

/// Records every command line and answers from a script.
///
/// A line is answered by the most recently scripted entry whose prefix
/// matches it, falling back to [`OK_REPLY`].
#[derive(Default)]
pub struct RecordingSession {
    commands: Mutex<Vec<String>>,
    scripts: Mutex<Vec<Script>>,
    sinks: Mutex<HashMap<u64, Sink>>,
    next_handler: AtomicU64,
}

impl RecordingSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, prefix: &str, reply: &str) {
        self.push(prefix, Ok(reply.to_string()), Duration::ZERO);
    }

    pub fn reply_after(&self, prefix: &str, reply: &str, delay: Duration) {
        self.push(prefix, Ok(reply.to_string()), delay);
    }

    /// Make the session itself fail, as a broken transport would.
    pub fn fail(&self, prefix: &str, message: &str) {
        self.push(prefix, Err(message.to_string()), Duration::ZERO);
    }

    fn push(&self, prefix: &str, reply: std::result::Result<String, String>, delay: Duration) {
        self.scripts.lock().unwrap().push(Script {
            prefix: prefix.to_string(),
            reply,
            delay,
        });
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().unwrap().len()
    }

    /// Fire the new-sample callbacks attached to `sink`.
    pub fn emit_sample(&self, pipeline: &str, sink: &str) -> usize {
        let sinks = self.sinks.lock().unwrap();
        let mut fired = 0;
        for entry in sinks.values() {
            if entry.pipeline == pipeline && entry.sink == sink {
                (entry.callback)(pipeline, sink);
                fired += 1;
            }
        }
        fired
    }
}

impl Session for RecordingSession {
    fn execute(&self, command: &str) -> Result<String> {
        self.commands.lock().unwrap().push(command.to_string());

        let (reply, delay) = {
            let scripts = self.scripts.lock().unwrap();
            match scripts.iter().rev().find(|s| command.starts_with(&s.prefix)) {
                Some(script) => (script.reply.clone(), script.delay),
                None => (Ok(OK_REPLY.to_string()), Duration::ZERO),
            }
        };

        if !delay.is_zero() {
            thread::sleep(delay);
        }
        reply.map_err(GpopError::Thread)
    }

    fn connect_sink(
        &self,
        pipeline: &str,
        sink: &str,
        callback: SinkCallback,
    ) -> Result<SinkHandlerId> {
        let id = self.next_handler.fetch_add(1, Ordering::Relaxed) + 1;
        self.sinks.lock().unwrap().insert(
            id,
            Sink {
                pipeline: pipeline.to_string(),
                sink: sink.to_string(),
                callback,
            },
        );
        Ok(SinkHandlerId(id))
    }

    fn disconnect_sink(&self, pipeline: &str, sink: &str, handler: SinkHandlerId) -> Result<()> {
        let mut sinks = self.sinks.lock().unwrap();
        match sinks.get(&handler.0) {
            Some(entry) if entry.pipeline == pipeline && entry.sink == sink => {
                sinks.remove(&handler.0);
                Ok(())
            }
            _ => Err(GpopError::NotFound(format!(
                "Handler {} on sink '{}' of pipeline '{}'",
                handler.0, sink, pipeline
            ))),
        }
    }
}
