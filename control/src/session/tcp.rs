// tcp.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use super::Session;
use crate::error::{GpopError, Result};

/// Default TCP port of the command daemon
pub const DEFAULT_PORT: u16 = 5000;

/// Default address of the command daemon
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Replies are terminated by a NUL byte.
const REPLY_TERMINATOR: u8 = b'\0';

/// Maximum size of a single reply, to bound memory on a misbehaving peer
pub const MAX_REPLY_SIZE: usize = 16 * 1024 * 1024; // 16MB

/// Session talking to a remote command daemon over TCP.
///
/// Every command uses its own connection, so a bus read blocked on one
/// thread never holds up commands issued from another.
#[derive(Debug, Clone)]
pub struct TcpSession {
    addr: SocketAddr,
    connect_timeout: Option<Duration>,
}

impl TcpSession {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            connect_timeout: None,
        }
    }

    /// Resolve `host:port`, keeping the first address.
    pub fn connect_to(host: &str, port: u16) -> Result<Self> {
        let addr = (host, port).to_socket_addrs()?.next().ok_or_else(|| {
            GpopError::InvalidArgument(format!("Cannot resolve address {}:{}", host, port))
        })?;
        Ok(Self::new(addr))
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn connect(&self) -> Result<TcpStream> {
        let stream = match self.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&self.addr, timeout)?,
            None => TcpStream::connect(self.addr)?,
        };
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

impl Default for TcpSession {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
    }
}

impl Session for TcpSession {
    fn execute(&self, command: &str) -> Result<String> {
        let mut stream = self.connect()?;
        stream.write_all(command.as_bytes())?;
        stream.flush()?;

        let mut reader = BufReader::new(&stream).take(MAX_REPLY_SIZE as u64);
        let mut reply = Vec::new();
        reader.read_until(REPLY_TERMINATOR, &mut reply)?;

        if reply.last() == Some(&REPLY_TERMINATOR) {
            reply.pop();
        } else if reply.len() >= MAX_REPLY_SIZE {
            return Err(GpopError::protocol(
                format!("reply exceeds {} bytes", MAX_REPLY_SIZE),
                "",
            ));
        }

        if let Err(e) = stream.shutdown(Shutdown::Both) {
            debug!("Failed to shut down connection to {}: {}", self.addr, e);
        }
        debug!("Received {} bytes from {}", reply.len(), self.addr);

        String::from_utf8(reply).map_err(|e| {
            let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
            GpopError::protocol(format!("reply is not UTF-8: {}", e.utf8_error()), &lossy)
        })
    }
}
