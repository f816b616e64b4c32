// wait.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::Ordering;
use std::task::{Context, Poll};
use std::thread;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::{BusWaitCallback, BusWaitRequest, WORKER_THREAD_NAME};
use crate::codec::{response, Command};
use crate::error::{GpopError, Result};
use crate::manager::Manager;

/// Reservation of one in-flight wait, released when the worker is done
/// (or when it never starts).
struct WaitSlot {
    manager: Manager,
}

impl WaitSlot {
    fn acquire(manager: &Manager) -> Result<Self> {
        let counter = manager.pending_counter();
        let limit = manager.options().max_pending_waits;

        // Relaxed is enough: the counter only bounds, it does not publish data
        let reserved = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |pending| {
            match limit {
                Some(max) if pending >= max => None,
                _ => Some(pending + 1),
            }
        });

        match reserved {
            Ok(_) => Ok(Self {
                manager: manager.clone(),
            }),
            Err(pending) => Err(GpopError::Thread(format!(
                "Maximum number of concurrent bus waits ({}) reached",
                pending
            ))),
        }
    }
}

impl Drop for WaitSlot {
    fn drop(&mut self) {
        self.manager.pending_counter().fetch_sub(1, Ordering::Relaxed);
    }
}

/// Configure the filter and timeout, then hand the read to a detached worker.
///
/// Returns as soon as the worker is spawned. When configuration or spawning
/// fails the callback is dropped without being called.
pub(crate) fn spawn(
    manager: &Manager,
    request: BusWaitRequest,
    callback: BusWaitCallback,
) -> Result<()> {
    let slot = WaitSlot::acquire(manager)?;

    debug!(
        "Configuring bus wait on '{}' (filter: {}, timeout: {})",
        request.pipeline, request.filter, request.timeout
    );

    let gateway = manager.gateway();
    gateway.execute(&Command::BusFilter {
        pipeline: &request.pipeline,
        filter: &request.filter,
    })?;
    gateway.execute(&Command::BusTimeout {
        pipeline: &request.pipeline,
        timeout: request.timeout,
    })?;

    let worker_manager = manager.clone();
    let pipeline = request.pipeline.clone();
    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || run_worker(worker_manager, request, callback, slot))
        .map_err(|e| {
            GpopError::Thread(format!(
                "Failed to spawn bus worker for pipeline '{}': {}",
                pipeline, e
            ))
        })?;

    debug!("Waiting for bus message on '{}'", pipeline);
    Ok(())
}

fn run_worker(manager: Manager, request: BusWaitRequest, callback: BusWaitCallback, slot: WaitSlot) {
    let response = manager
        .gateway()
        .execute(&Command::BusRead(&request.pipeline));

    match &response {
        Ok(_) => debug!("Bus read on '{}' completed", request.pipeline),
        Err(e) => debug!("Bus read on '{}' failed: {}", request.pipeline, e),
    }

    if let Err(e) = callback(&manager, &request, response) {
        warn!(
            "Bus wait callback for pipeline '{}' failed: {}",
            request.pipeline, e
        );
    }

    drop(slot);
}

/// Future resolving to the classified outcome of a bus wait.
///
/// Resolves to the raw payload on a message, [`GpopError::BusTimeout`] when
/// the backend's timeout elapsed, or the read/decode error.
#[derive(Debug)]
pub struct BusWaitFuture {
    rx: oneshot::Receiver<Result<String>>,
}

impl BusWaitFuture {
    pub(crate) fn spawn(manager: &Manager, request: BusWaitRequest) -> Result<Self> {
        let (tx, rx) = oneshot::channel();

        spawn(
            manager,
            request,
            Box::new(move |_: &Manager, request: &BusWaitRequest, reply: Result<String>| {
                if tx.send(response::bus_outcome(reply)).is_err() {
                    debug!(
                        "Bus wait future for '{}' dropped before completion",
                        request.pipeline
                    );
                }
                Ok(())
            }),
        )?;

        Ok(Self { rx })
    }
}

impl Future for BusWaitFuture {
    type Output = Result<String>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                Err(GpopError::Thread(
                    "bus worker exited without reporting a result".to_string(),
                ))
            })
        })
    }
}
