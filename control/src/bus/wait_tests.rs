// wait_tests.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::error::GpopError;
use crate::manager::{Manager, ManagerOptions};
use crate::testing::{RecordingSession, EOS_REPLY, TIMEOUT_REPLY};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_bus_timeout_wire_values() {
    assert_eq!(BusTimeout::Infinite.as_nanos(), -1);
    assert_eq!(BusTimeout::Poll.as_nanos(), 0);
    assert_eq!(BusTimeout::from(-5i64).as_nanos(), -1);
    assert_eq!(BusTimeout::from(0i64), BusTimeout::Poll);
    assert_eq!(BusTimeout::from(1_500_000_000i64).as_nanos(), 1_500_000_000);
    assert_eq!(BusTimeout::from(None::<Duration>), BusTimeout::Infinite);
    assert_eq!(
        BusTimeout::from(Some(Duration::from_millis(20))).to_string(),
        "20000000"
    );
}

#[test]
fn test_async_wait_command_order() {
    let session = RecordingSession::new();
    session.reply("bus_read", EOS_REPLY);
    let manager = Manager::new(session.clone());
    let (tx, rx) = mpsc::channel();

    manager
        .bus_wait_async("pipe", "eos", BusTimeout::Infinite, move |_, request, reply| {
            tx.send((request.clone(), reply)).unwrap();
            Ok(())
        })
        .unwrap();

    let (request, reply) = rx.recv_timeout(RECV_TIMEOUT).unwrap();
    assert_eq!(request.pipeline, "pipe");
    assert_eq!(request.filter, "eos");
    assert_eq!(reply.unwrap(), EOS_REPLY);
    assert_eq!(
        session.commands(),
        vec!["bus_filter pipe eos", "bus_timeout pipe -1", "bus_read pipe"]
    );
}

#[test]
fn test_async_wait_returns_before_read_completes() {
    let session = RecordingSession::new();
    session.reply_after("bus_read", EOS_REPLY, Duration::from_millis(500));
    let manager = Manager::new(session.clone());
    let (tx, rx) = mpsc::channel();

    let start = Instant::now();
    manager
        .bus_wait_async("pipe", "eos", BusTimeout::Infinite, move |_, _, reply| {
            tx.send(reply).unwrap();
            Ok(())
        })
        .unwrap();
    assert!(start.elapsed() < Duration::from_millis(400));
    assert!(rx.try_recv().is_err());

    assert_eq!(rx.recv_timeout(RECV_TIMEOUT).unwrap().unwrap(), EOS_REPLY);
}

#[test]
fn test_async_wait_callback_called_once() {
    let session = RecordingSession::new();
    session.reply("bus_read", TIMEOUT_REPLY);
    let manager = Manager::new(session);
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel();

    let counter = Arc::clone(&calls);
    manager
        .bus_wait_async("pipe", "eos", BusTimeout::Poll, move |_, _, reply| {
            counter.fetch_add(1, Ordering::SeqCst);
            tx.send(reply).unwrap();
            Ok(())
        })
        .unwrap();

    // The raw reply is handed over untouched, even on timeout
    assert_eq!(rx.recv_timeout(RECV_TIMEOUT).unwrap().unwrap(), TIMEOUT_REPLY);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_async_wait_read_failure_reaches_callback() {
    let session = RecordingSession::new();
    session.fail("bus_read", "connection reset");
    let manager = Manager::new(session);
    let (tx, rx) = mpsc::channel();

    manager
        .bus_wait_async("pipe", "eos", BusTimeout::Infinite, move |_, _, reply| {
            tx.send(reply).unwrap();
            Ok(())
        })
        .unwrap();

    assert!(rx.recv_timeout(RECV_TIMEOUT).unwrap().is_err());
}

#[test]
fn test_async_wait_configure_failure_skips_callback() {
    let session = RecordingSession::new();
    session.reply("bus_timeout", r#"{"code":4,"description":"Bad pipeline name"}"#);
    let manager = Manager::new(session.clone());
    let called = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&called);
    let result = manager.bus_wait_async("pipe", "eos", BusTimeout::Infinite, move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(matches!(result, Err(GpopError::NotFound(_))));
    thread::sleep(Duration::from_millis(50));
    assert_eq!(called.load(Ordering::SeqCst), 0);
    assert_eq!(
        session.commands(),
        vec!["bus_filter pipe eos", "bus_timeout pipe -1"]
    );
    assert_eq!(manager.pending_waits(), 0);
}

#[test]
fn test_async_wait_callback_error_is_contained() {
    let session = RecordingSession::new();
    session.reply("bus_read", EOS_REPLY);
    let manager = Manager::new(session);
    let (tx, rx) = mpsc::channel();

    manager
        .bus_wait_async("pipe", "eos", BusTimeout::Infinite, move |_, _, _| {
            tx.send(()).unwrap();
            Err(GpopError::InvalidArgument("rejected".to_string()))
        })
        .unwrap();

    rx.recv_timeout(RECV_TIMEOUT).unwrap();
}

#[test]
fn test_callback_can_issue_commands() {
    let session = RecordingSession::new();
    session.reply("bus_read", EOS_REPLY);
    let manager = Manager::new(session.clone());
    let (tx, rx) = mpsc::channel();

    manager
        .bus_wait_async("pipe", "eos", BusTimeout::Infinite, move |manager, request, _| {
            let result = manager.pipeline_stop(&request.pipeline);
            tx.send(result.is_ok()).unwrap();
            Ok(())
        })
        .unwrap();

    assert!(rx.recv_timeout(RECV_TIMEOUT).unwrap());
    assert_eq!(session.commands().last().unwrap(), "pipeline_stop pipe");
}

#[test]
fn test_pending_wait_limit() {
    let session = RecordingSession::new();
    session.reply_after("bus_read", EOS_REPLY, Duration::from_millis(300));
    let manager = Manager::with_options(
        session.clone(),
        ManagerOptions {
            max_pending_waits: Some(1),
        },
    );
    let (tx, rx) = mpsc::channel();

    let first = tx.clone();
    manager
        .bus_wait_async("p1", "eos", BusTimeout::Infinite, move |_, _, reply| {
            first.send(reply).unwrap();
            Ok(())
        })
        .unwrap();
    assert_eq!(manager.pending_waits(), 1);

    let second = manager.bus_wait_async("p2", "eos", BusTimeout::Infinite, |_, _, _| Ok(()));
    assert!(matches!(second, Err(GpopError::Thread(_))));
    // Rejected before anything was sent for p2
    assert!(session.commands().iter().all(|c| !c.contains("p2")));

    rx.recv_timeout(RECV_TIMEOUT).unwrap().unwrap();
    let deadline = Instant::now() + RECV_TIMEOUT;
    while manager.pending_waits() > 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(manager.pending_waits(), 0);

    manager
        .bus_wait_async("p2", "eos", BusTimeout::Infinite, move |_, _, reply| {
            tx.send(reply).unwrap();
            Ok(())
        })
        .unwrap();
    rx.recv_timeout(RECV_TIMEOUT).unwrap().unwrap();
}

#[tokio::test]
async fn test_bus_wait_future() {
    let session = RecordingSession::new();
    session.reply_after("bus_read", EOS_REPLY, Duration::from_millis(50));
    let manager = Manager::new(session.clone());

    let future = manager
        .bus_wait_future("pipe", "eos", BusTimeout::Infinite)
        .unwrap();
    assert_eq!(future.await.unwrap(), EOS_REPLY);
}

#[tokio::test]
async fn test_bus_wait_future_timeout() {
    let session = RecordingSession::new();
    session.reply("bus_read", TIMEOUT_REPLY);
    let manager = Manager::new(session);

    let result = manager
        .bus_wait_future("pipe", "eos", Duration::from_millis(10))
        .unwrap()
        .await;

    let err = result.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.response(), Some(TIMEOUT_REPLY));
}
