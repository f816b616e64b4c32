// gateway.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use tracing::{debug, trace};

use super::{Session, SinkCallback, SinkHandlerId};
use crate::codec::{response, Command};
use crate::error::{GpopError, Result};

/// Forwards encoded commands to the session. No retries, no buffering.
#[derive(Clone)]
pub struct SessionGateway {
    session: Arc<dyn Session>,
}

impl SessionGateway {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    pub fn execute(&self, command: &Command<'_>) -> Result<String> {
        let line = command.encode()?;
        self.execute_line(&line)
    }

    /// Send an already formatted command line.
    pub fn execute_line(&self, line: &str) -> Result<String> {
        if line.trim().is_empty() {
            return Err(GpopError::NullArgument("command"));
        }

        debug!("Executing '{}'", line);
        let reply = self.session.execute(line)?;
        trace!("Reply to '{}': {}", line, reply);

        response::check_envelope(&reply)?;
        Ok(reply)
    }

    pub fn connect_sink(
        &self,
        pipeline: &str,
        sink: &str,
        callback: SinkCallback,
    ) -> Result<SinkHandlerId> {
        debug!("Connecting to sink '{}' of pipeline '{}'", sink, pipeline);
        self.session.connect_sink(pipeline, sink, callback)
    }

    pub fn disconnect_sink(&self, pipeline: &str, sink: &str, handler: SinkHandlerId) -> Result<()> {
        debug!(
            "Disconnecting handler {} from sink '{}' of pipeline '{}'",
            handler.0, sink, pipeline
        );
        self.session.disconnect_sink(pipeline, sink, handler)
    }
}
