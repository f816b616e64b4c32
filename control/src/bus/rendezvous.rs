// rendezvous.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

//! One-shot hand-off between a bus worker and a blocked caller.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use tracing::debug;

use crate::error::{GpopError, Result};

/// Writing half. Dropping it unused wakes the waiter with a
/// [`GpopError::Thread`].
pub struct Completer {
    tx: SyncSender<Result<String>>,
}

impl Completer {
    pub fn complete(self, outcome: Result<String>) {
        // Capacity 1 and a single send, so this never blocks
        if self.tx.send(outcome).is_err() {
            debug!("Bus wait caller went away before completion");
        }
    }
}

/// Reading half, owned by the blocked caller.
pub struct Waiter {
    rx: Receiver<Result<String>>,
}

impl Waiter {
    /// Block until the completer has written the outcome.
    ///
    /// Returns right away if that already happened.
    pub fn wait(self) -> Result<String> {
        self.rx.recv().unwrap_or_else(|_| {
            Err(GpopError::Thread(
                "bus worker exited without reporting a result".to_string(),
            ))
        })
    }
}

pub fn rendezvous() -> (Completer, Waiter) {
    let (tx, rx) = sync_channel(1);
    (Completer { tx }, Waiter { rx })
}
