// mod.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

//! Waiting for pipeline bus messages.
//!
//! A wait goes through `Idle -> Configuring -> Waiting -> Completed`:
//! the filter and the timeout are configured on the session from the calling
//! thread, then a detached worker thread performs the single blocking
//! `bus_read` and reports through a completion callback exactly once.
//! Synchronous and `async` waits are built on top of that primitive.

pub mod rendezvous;
pub mod wait;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::manager::Manager;

pub use wait::BusWaitFuture;

/// Name given to bus worker threads.
pub const WORKER_THREAD_NAME: &str = "gpop-bus-wait";

/// How long the backend waits for a matching message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusTimeout {
    /// Block until a matching message arrives.
    Infinite,
    /// Return immediately with whatever is queued.
    Poll,
    After(Duration),
}

impl BusTimeout {
    /// Wire form: nanoseconds, `-1` for infinite.
    pub fn as_nanos(&self) -> i64 {
        match self {
            BusTimeout::Infinite => -1,
            BusTimeout::Poll => 0,
            BusTimeout::After(duration) => i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX),
        }
    }
}

impl From<i64> for BusTimeout {
    fn from(nanos: i64) -> Self {
        match nanos {
            n if n < 0 => BusTimeout::Infinite,
            0 => BusTimeout::Poll,
            n => BusTimeout::After(Duration::from_nanos(n.unsigned_abs())),
        }
    }
}

impl From<Duration> for BusTimeout {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            BusTimeout::Poll
        } else {
            BusTimeout::After(duration)
        }
    }
}

impl From<Option<Duration>> for BusTimeout {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or(BusTimeout::Infinite, BusTimeout::from)
    }
}

impl std::fmt::Display for BusTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_nanos())
    }
}

/// One bus wait: which pipeline, which message types, for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusWaitRequest {
    pub pipeline: String,
    pub filter: String,
    pub timeout: BusTimeout,
}

/// Completion callback of an asynchronous bus wait.
///
/// Invoked exactly once, from the worker thread, with the raw reply of the
/// bus read or the error that prevented it. Caller context travels in the
/// closure's captures.
pub type BusWaitCallback =
    Box<dyn FnOnce(&Manager, &BusWaitRequest, Result<String>) -> Result<()> + Send + 'static>;


#[cfg(test)]
mod wait_tests;
