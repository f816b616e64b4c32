// element.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use tracing::debug;

use super::{require, Manager};
use crate::codec::{
    response, Command, PropertyValue, ValueKind, NAME_FIELD, NODES_FIELD, VALUE_FIELD,
};
use crate::error::Result;
use crate::session::{SinkCallback, SinkHandlerId};

impl Manager {
    /// Read `property` of `element` and decode it as `kind`.
    pub fn element_get(
        &self,
        pipeline: &str,
        element: &str,
        property: &str,
        kind: ValueKind,
    ) -> Result<PropertyValue> {
        let pipeline = require(pipeline, "pipeline")?;
        let element = require(element, "element")?;
        let property = require(property, "property")?;

        let reply = self.gateway().execute(&Command::ElementGet {
            pipeline,
            element,
            property,
        })?;
        let text = response::child_string(&reply, VALUE_FIELD)?;
        PropertyValue::decode(kind, &text)
    }

    pub fn element_set(
        &self,
        pipeline: &str,
        element: &str,
        property: &str,
        value: &PropertyValue,
    ) -> Result<()> {
        let pipeline = require(pipeline, "pipeline")?;
        let element = require(element, "element")?;
        let property = require(property, "property")?;

        self.gateway().execute(&Command::ElementSet {
            pipeline,
            element,
            property,
            value,
        })?;
        debug!("Set {}.{}.{} = {}", pipeline, element, property, value);
        Ok(())
    }

    pub fn element_properties_list(&self, pipeline: &str, element: &str) -> Result<Vec<String>> {
        let pipeline = require(pipeline, "pipeline")?;
        let element = require(element, "element")?;

        let reply = self
            .gateway()
            .execute(&Command::ListProperties { pipeline, element })?;
        response::child_string_array(&reply, NODES_FIELD, NAME_FIELD)
    }

    pub fn pipeline_list_signals(&self, pipeline: &str, element: &str) -> Result<Vec<String>> {
        let pipeline = require(pipeline, "pipeline")?;
        let element = require(element, "element")?;

        let reply = self
            .gateway()
            .execute(&Command::ListSignals { pipeline, element })?;
        response::child_string_array(&reply, NODES_FIELD, NAME_FIELD)
    }

    /// Arm `signal` on `element` and wait for it to fire.
    ///
    /// `timeout` is handed to the backend as is; negative waits forever.
    /// Returns the raw reply of the connect command, which carries the
    /// signal arguments.
    pub fn pipeline_signal_connect(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
        timeout: i32,
    ) -> Result<String> {
        let pipeline = require(pipeline, "pipeline")?;
        let element = require(element, "element")?;
        let signal = require(signal, "signal")?;
        let gateway = self.gateway();

        gateway.execute(&Command::SignalTimeout {
            pipeline,
            element,
            signal,
            timeout,
        })?;
        gateway.execute(&Command::SignalConnect {
            pipeline,
            element,
            signal,
        })
    }

    pub fn pipeline_signal_disconnect(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
    ) -> Result<()> {
        let pipeline = require(pipeline, "pipeline")?;
        let element = require(element, "element")?;
        let signal = require(signal, "signal")?;

        self.gateway().execute(&Command::SignalDisconnect {
            pipeline,
            element,
            signal,
        })?;
        Ok(())
    }

    /// Call `callback` on every new sample produced by the application sink
    /// `sink`.
    pub fn signal_sink_connect<F>(
        &self,
        pipeline: &str,
        sink: &str,
        callback: F,
    ) -> Result<SinkHandlerId>
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        let pipeline = require(pipeline, "pipeline")?;
        let sink = require(sink, "sink")?;
        let callback: SinkCallback = Box::new(callback);

        self.gateway().connect_sink(pipeline, sink, callback)
    }

    pub fn signal_sink_disconnect(
        &self,
        pipeline: &str,
        sink: &str,
        handler: SinkHandlerId,
    ) -> Result<()> {
        let pipeline = require(pipeline, "pipeline")?;
        let sink = require(sink, "sink")?;

        self.gateway().disconnect_sink(pipeline, sink, handler)
    }
}
