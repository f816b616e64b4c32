// mod.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod gateway;
pub mod tcp;

pub use gateway::SessionGateway;
pub use tcp::TcpSession;

use crate::error::{GpopError, Result};

/// Identifier of a native sink callback, as returned by
/// [`Session::connect_sink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkHandlerId(pub u64);

/// Called on every new sample of a connected sink, with the pipeline and sink
/// names.
pub type SinkCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;

/// Command execution backend.
///
/// `execute` may block indefinitely on `bus_read`, and it is called from bus
/// worker threads while other commands are in flight on other threads, so
/// implementations must tolerate concurrent calls. Commands issued from one
/// thread must be executed in the order they are issued.
pub trait Session: Send + Sync {
    /// Run one command line and return the raw reply.
    fn execute(&self, command: &str) -> Result<String>;

    /// Attach `callback` to the new-sample signal of an application sink.
    ///
    /// Only sessions living in the same process as the pipelines can do this.
    fn connect_sink(
        &self,
        pipeline: &str,
        sink: &str,
        _callback: SinkCallback,
    ) -> Result<SinkHandlerId> {
        Err(GpopError::NotFound(format!(
            "Sink '{}' of pipeline '{}' is not reachable from this session",
            sink, pipeline
        )))
    }

    fn disconnect_sink(&self, pipeline: &str, sink: &str, _handler: SinkHandlerId) -> Result<()> {
        Err(GpopError::NotFound(format!(
            "Sink '{}' of pipeline '{}' is not reachable from this session",
            sink, pipeline
        )))
    }
}
