// mod.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

mod element;
mod pipeline;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::bus::{rendezvous, wait, BusTimeout, BusWaitFuture, BusWaitRequest};
use crate::codec::{response, Command};
use crate::error::{GpopError, Result};
use crate::session::{Session, SessionGateway};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Upper bound on bus waits in flight at once. `None` spawns one worker
    /// per wait without limit.
    pub max_pending_waits: Option<usize>,
}

struct Inner {
    gateway: SessionGateway,
    options: ManagerOptions,
    pending_waits: AtomicUsize,
}

impl Drop for Inner {
    fn drop(&mut self) {
        debug!("Releasing manager session");
    }
}

/// Handle to one backend session.
///
/// Cloning is cheap and every clone drives the same session. Bus workers hold
/// a clone until their callback returns, so the session outlives any wait
/// still in flight.
#[derive(Clone)]
pub struct Manager {
    inner: Arc<Inner>,
}

/// An empty or blank string stands for an absent argument.
fn require<'a>(value: &'a str, name: &'static str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(GpopError::NullArgument(name))
    } else {
        Ok(value)
    }
}

impl Manager {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self::with_options(session, ManagerOptions::default())
    }

    pub fn with_options(session: Arc<dyn Session>, options: ManagerOptions) -> Self {
        info!(
            "Manager created (max pending bus waits: {})",
            options
                .max_pending_waits
                .map_or_else(|| "unbounded".to_string(), |max| max.to_string())
        );

        Self {
            inner: Arc::new(Inner {
                gateway: SessionGateway::new(session),
                options,
                pending_waits: AtomicUsize::new(0),
            }),
        }
    }

    pub fn options(&self) -> ManagerOptions {
        self.inner.options
    }

    pub(crate) fn gateway(&self) -> &SessionGateway {
        &self.inner.gateway
    }

    pub(crate) fn pending_counter(&self) -> &AtomicUsize {
        &self.inner.pending_waits
    }

    /// Number of bus waits whose worker has not finished yet.
    pub fn pending_waits(&self) -> usize {
        self.inner.pending_waits.load(Ordering::Relaxed)
    }

    /// Send a raw command line and return the reply.
    pub fn execute(&self, command: &str) -> Result<String> {
        self.gateway().execute_line(require(command, "command")?)
    }

    /// Configure the backend's debug output.
    pub fn debug(&self, threshold: &str, colors: bool, reset: bool) -> Result<()> {
        let threshold = require(threshold, "threshold")?;
        let gateway = self.gateway();

        gateway.execute(&Command::DebugEnable(true))?;
        gateway.execute(&Command::DebugThreshold(threshold))?;
        gateway.execute(&Command::DebugColor(colors))?;
        gateway.execute(&Command::DebugReset(reset))?;
        Ok(())
    }

    /// Wait for a bus message without blocking the caller.
    ///
    /// Sends the filter and timeout, then returns while a worker thread reads
    /// the bus. `callback` runs on that worker exactly once with the raw reply.
    /// If configuring fails the error is returned here and `callback` is never
    /// called.
    pub fn bus_wait_async<F>(
        &self,
        pipeline: &str,
        filter: &str,
        timeout: impl Into<BusTimeout>,
        callback: F,
    ) -> Result<()>
    where
        F: FnOnce(&Manager, &BusWaitRequest, Result<String>) -> Result<()> + Send + 'static,
    {
        let request = self.bus_request(pipeline, filter, timeout.into())?;
        wait::spawn(self, request, Box::new(callback))
    }

    /// Block until a bus message matching `filter` arrives on `pipeline`.
    ///
    /// Returns the raw payload. A backend timeout is reported as
    /// [`GpopError::BusTimeout`], which still carries the payload.
    pub fn bus_wait(
        &self,
        pipeline: &str,
        filter: &str,
        timeout: impl Into<BusTimeout>,
    ) -> Result<String> {
        let request = self.bus_request(pipeline, filter, timeout.into())?;
        let (completer, waiter) = rendezvous::rendezvous();

        wait::spawn(
            self,
            request,
            Box::new(move |_: &Manager, _: &BusWaitRequest, reply: Result<String>| {
                completer.complete(response::bus_outcome(reply));
                Ok(())
            }),
        )?;

        waiter.wait()
    }

    /// Same as [`Manager::bus_wait`], resolving as a future instead of
    /// blocking the thread.
    pub fn bus_wait_future(
        &self,
        pipeline: &str,
        filter: &str,
        timeout: impl Into<BusTimeout>,
    ) -> Result<BusWaitFuture> {
        let request = self.bus_request(pipeline, filter, timeout.into())?;
        BusWaitFuture::spawn(self, request)
    }

    fn bus_request(&self, pipeline: &str, filter: &str, timeout: BusTimeout) -> Result<BusWaitRequest> {
        Ok(BusWaitRequest {
            pipeline: require(pipeline, "pipeline")?.to_string(),
            filter: require(filter, "filter")?.to_string(),
            timeout,
        })
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("options", &self.inner.options)
            .field("pending_waits", &self.pending_waits())
            .finish()
    }
}
