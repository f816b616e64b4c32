// lib.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

//! Client-side control of remote media pipelines.
//!
//! A [`Manager`] turns typed calls into single-line commands, runs them on a
//! [`Session`] and decodes the JSON replies. Bus messages can be awaited
//! synchronously, through a completion callback, or as a future.

pub mod bus;
pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod manager;
pub mod session;

#[cfg(test)]
mod testing;

pub use bus::{BusTimeout, BusWaitCallback, BusWaitFuture, BusWaitRequest};
pub use codec::{PropertyValue, Seek, SeekFlags, SeekFormat, SeekType, ValueKind};
pub use error::{GpopError, Result};
pub use event::PipelineState;
pub use manager::{Manager, ManagerOptions};
pub use session::{Session, SinkCallback, SinkHandlerId, TcpSession};
