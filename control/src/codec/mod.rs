// mod.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod command;
pub mod response;
pub mod value;

pub use command::{Command, Seek, SeekFlags, SeekFormat, SeekType};
pub use value::{PropertyValue, ValueKind};

/// Array holding the children of a listing reply.
pub const NODES_FIELD: &str = "nodes";

/// Per-node field naming the child.
pub const NAME_FIELD: &str = "name";

/// Field carrying the value of a read (`element_get`, state reads).
pub const VALUE_FIELD: &str = "value";


#[cfg(test)]
mod response_tests;
