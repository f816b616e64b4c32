// config.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};

use crate::bus::BusTimeout;
use crate::codec::{Seek, SeekFlags, ValueKind};
use crate::error::Result;
use crate::manager::ManagerOptions;
use crate::session::tcp::{TcpSession, DEFAULT_HOST, DEFAULT_PORT};

/// Command line client for the gpop pipeline daemon
#[derive(Parser, Debug, Clone)]
#[command(name = "gpop-ctl")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Daemon host address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "GPOP_HOST")]
    pub host: String,

    /// Daemon TCP port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GPOP_PORT")]
    pub port: u16,

    /// Connection timeout in milliseconds (system default if unset)
    #[arg(long, env = "GPOP_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Maximum number of bus waits in flight at once
    #[arg(long)]
    pub max_pending_waits: Option<usize>,

    #[command(subcommand)]
    pub command: CtlCommand,
}

impl Config {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn manager_options(&self) -> ManagerOptions {
        ManagerOptions {
            max_pending_waits: self.max_pending_waits,
        }
    }

    pub fn session(&self) -> Result<TcpSession> {
        let session = TcpSession::connect_to(&self.host, self.port)?;
        Ok(match self.connect_timeout() {
            Some(timeout) => session.with_connect_timeout(timeout),
            None => session,
        })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CtlCommand {
    /// Create a pipeline from a launch description
    Create {
        name: String,
        /// Launch description, e.g. "videotestsrc ! autovideosink"
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        description: Vec<String>,
    },
    Delete {
        name: String,
    },
    Play {
        name: String,
    },
    Pause {
        name: String,
    },
    Stop {
        name: String,
    },
    /// List pipeline names
    List,
    /// Print the pipeline graph
    Graph {
        name: String,
    },
    Verbose {
        name: String,
        #[arg(action = ArgAction::Set)]
        enable: bool,
    },
    /// Print the current pipeline state
    State {
        name: String,
    },
    Eos {
        name: String,
    },
    FlushStart {
        name: String,
    },
    FlushStop {
        name: String,
        /// Reset the running time
        #[arg(long)]
        reset: bool,
    },
    /// Flushing seek to a position in nanoseconds
    Seek {
        name: String,
        position: i64,
        #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
        rate: f64,
        /// Stop position in nanoseconds, -1 for none
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        stop: i64,
        #[arg(long)]
        accurate: bool,
        #[arg(long)]
        key_unit: bool,
    },
    /// List the elements of a pipeline
    Elements {
        name: String,
    },
    Properties {
        pipeline: String,
        element: String,
    },
    Signals {
        pipeline: String,
        element: String,
    },
    /// Read an element property
    Get {
        pipeline: String,
        element: String,
        property: String,
        #[arg(long, default_value = "string")]
        kind: ValueKind,
    },
    /// Write an element property
    Set {
        pipeline: String,
        element: String,
        property: String,
        value: String,
        #[arg(long, default_value = "string")]
        kind: ValueKind,
    },
    /// Wait for a signal to fire and print its arguments
    SignalConnect {
        pipeline: String,
        element: String,
        signal: String,
        /// Timeout handed to the daemon, negative waits forever
        #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
        timeout: i32,
    },
    SignalDisconnect {
        pipeline: String,
        element: String,
        signal: String,
    },
    /// Configure the daemon's debug output
    Debug {
        threshold: String,
        #[arg(long)]
        colors: bool,
        #[arg(long)]
        reset: bool,
    },
    /// Wait for a bus message
    Wait {
        pipeline: String,
        #[arg(default_value = "eos")]
        filter: String,
        /// Timeout in milliseconds, waits forever if unset
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Send a raw command line
    Raw {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

impl CtlCommand {
    /// Bus timeout of a `wait` command, `None` for other commands.
    pub fn bus_timeout(&self) -> Option<BusTimeout> {
        match self {
            CtlCommand::Wait { timeout_ms, .. } => {
                Some(BusTimeout::from(timeout_ms.map(Duration::from_millis)))
            }
            _ => None,
        }
    }

    /// Seek described by a `seek` command, `None` for other commands.
    pub fn seek(&self) -> Option<Seek> {
        match self {
            CtlCommand::Seek {
                position,
                rate,
                stop,
                accurate,
                key_unit,
                ..
            } => {
                let mut flags = SeekFlags::FLUSH;
                if *accurate {
                    flags = flags | SeekFlags::ACCURATE;
                }
                if *key_unit {
                    flags = flags | SeekFlags::KEY_UNIT;
                }
                Some(Seek {
                    rate: *rate,
                    flags,
                    stop: *stop,
                    ..Seek::to_position(*position)
                })
            }
            _ => None,
        }
    }
}
