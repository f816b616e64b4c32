// response_tests.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use super::response::*;
use crate::error::GpopError;
use crate::testing::{CORRUPTED_REPLY, EOS_REPLY, TIMEOUT_REPLY};

#[test]
fn test_check_envelope_success() {
    assert!(check_envelope(EOS_REPLY).is_ok());
    assert!(check_envelope("digraph pipeline {}").is_ok());
}

#[test]
fn test_check_envelope_not_found() {
    let result = check_envelope(r#"{"code":4,"description":"Bad pipeline name"}"#);
    match result {
        Err(GpopError::NotFound(description)) => assert_eq!(description, "Bad pipeline name"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_check_envelope_backend_error() {
    let reply = r#"{"code":7,"description":"Bad command"}"#;
    let err = check_envelope(reply).unwrap_err();
    assert!(matches!(
        err,
        GpopError::Backend { code: 7, ref description, .. } if description == "Bad command"
    ));
    assert_eq!(err.response(), Some(reply));
}

#[test]
fn test_child_string_in_response_object() {
    let reply = r#"{"code":0,"response":{"name":"state","value":"PLAYING"}}"#;
    assert_eq!(child_string(reply, "value").unwrap(), "PLAYING");
}

#[test]
fn test_child_string_at_root() {
    assert_eq!(child_string(r#"{"value":42}"#, "value").unwrap(), "42");
    assert_eq!(child_string(r#"{"value":true}"#, "value").unwrap(), "true");
}

#[test]
fn test_child_string_missing_keeps_response() {
    let reply = r#"{"code":0,"response":{"other":1}}"#;
    let err = child_string(reply, "value").unwrap_err();
    assert!(matches!(err, GpopError::Protocol { .. }));
    assert_eq!(err.response(), Some(reply));
}

#[test]
fn test_child_string_malformed() {
    let err = child_string("{not json", "value").unwrap_err();
    assert!(matches!(err, GpopError::Protocol { .. }));
}

#[test]
fn test_child_string_array_in_order() {
    let reply = r#"{"code":0,"response":{"nodes":[{"name":"p0"},{"name":"p1"},{"name":"p2"}]}}"#;
    assert_eq!(
        child_string_array(reply, "nodes", "name").unwrap(),
        vec!["p0", "p1", "p2"]
    );
}

#[test]
fn test_child_string_array_empty_and_invalid() {
    let empty = r#"{"code":0,"response":{"nodes":[]}}"#;
    assert!(child_string_array(empty, "nodes", "name").unwrap().is_empty());

    let not_array = r#"{"code":0,"response":{"nodes":"p0"}}"#;
    assert!(child_string_array(not_array, "nodes", "name").is_err());

    let missing_name = r#"{"code":0,"response":{"nodes":[{"id":1}]}}"#;
    assert!(child_string_array(missing_name, "nodes", "name").is_err());
}

#[test]
fn test_is_null() {
    assert!(is_null(TIMEOUT_REPLY, RESPONSE_FIELD).unwrap());
    assert!(!is_null(EOS_REPLY, RESPONSE_FIELD).unwrap());
    assert!(is_null(CORRUPTED_REPLY, RESPONSE_FIELD).is_err());
}

#[test]
fn test_bus_outcome() {
    assert_eq!(bus_outcome(Ok(EOS_REPLY.to_string())).unwrap(), EOS_REPLY);

    let timeout = bus_outcome(Ok(TIMEOUT_REPLY.to_string())).unwrap_err();
    assert!(timeout.is_timeout());
    assert_eq!(timeout.response(), Some(TIMEOUT_REPLY));

    let corrupted = bus_outcome(Ok(CORRUPTED_REPLY.to_string())).unwrap_err();
    assert!(matches!(corrupted, GpopError::Protocol { .. }));
    assert_eq!(corrupted.response(), Some(CORRUPTED_REPLY));

    let rejected = r#"{"code":13,"description":"Bad command","response":null}"#;
    let backend = bus_outcome(Err(GpopError::Backend {
        code: 13,
        description: "Bad command".to_string(),
        response: rejected.to_string(),
    }))
    .unwrap_err();
    assert!(matches!(backend, GpopError::Protocol { .. }));
    assert_eq!(backend.response(), Some(rejected));

    let failed = bus_outcome(Err(GpopError::Thread("gone".to_string()))).unwrap_err();
    assert!(matches!(failed, GpopError::Thread(_)));
}
