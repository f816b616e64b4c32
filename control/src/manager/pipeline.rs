// pipeline.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use tracing::info;

use super::{require, Manager};
use crate::codec::{response, Command, Seek, NAME_FIELD, NODES_FIELD, VALUE_FIELD};
use crate::error::{GpopError, Result};
use crate::event::PipelineState;

impl Manager {
    pub fn pipeline_create(&self, name: &str, description: &str) -> Result<()> {
        let name = require(name, "pipeline")?;
        let description = require(description, "description")?;

        self.gateway()
            .execute(&Command::PipelineCreate { name, description })?;
        info!("Created pipeline '{}': {}", name, description);
        Ok(())
    }

    pub fn pipeline_delete(&self, name: &str) -> Result<()> {
        let name = require(name, "pipeline")?;
        self.gateway().execute(&Command::PipelineDelete(name))?;
        info!("Deleted pipeline '{}'", name);
        Ok(())
    }

    pub fn pipeline_play(&self, name: &str) -> Result<()> {
        let name = require(name, "pipeline")?;
        self.gateway().execute(&Command::PipelinePlay(name))?;
        Ok(())
    }

    pub fn pipeline_pause(&self, name: &str) -> Result<()> {
        let name = require(name, "pipeline")?;
        self.gateway().execute(&Command::PipelinePause(name))?;
        Ok(())
    }

    pub fn pipeline_stop(&self, name: &str) -> Result<()> {
        let name = require(name, "pipeline")?;
        self.gateway().execute(&Command::PipelineStop(name))?;
        Ok(())
    }

    /// Names of all pipelines known to the session.
    pub fn pipeline_list(&self) -> Result<Vec<String>> {
        let reply = self.gateway().execute(&Command::PipelineList)?;
        response::child_string_array(&reply, NODES_FIELD, NAME_FIELD)
    }

    /// Raw reply of the graph request (a DOT description wrapped by the backend).
    pub fn pipeline_get_graph(&self, name: &str) -> Result<String> {
        let name = require(name, "pipeline")?;
        self.gateway().execute(&Command::PipelineGetGraph(name))
    }

    pub fn pipeline_verbose(&self, name: &str, enable: bool) -> Result<()> {
        let pipeline = require(name, "pipeline")?;
        self.gateway()
            .execute(&Command::PipelineVerbose { pipeline, enable })?;
        Ok(())
    }

    pub fn pipeline_get_state(&self, name: &str) -> Result<PipelineState> {
        let name = require(name, "pipeline")?;
        let reply = self.gateway().execute(&Command::PipelineGetState(name))?;
        let value = response::child_string(&reply, VALUE_FIELD)?;

        value.parse().map_err(|_| {
            GpopError::protocol(format!("unknown pipeline state '{}'", value), &reply)
        })
    }

    pub fn pipeline_flush_start(&self, name: &str) -> Result<()> {
        let name = require(name, "pipeline")?;
        self.gateway().execute(&Command::FlushStart(name))?;
        Ok(())
    }

    pub fn pipeline_flush_stop(&self, name: &str, reset: bool) -> Result<()> {
        let pipeline = require(name, "pipeline")?;
        self.gateway()
            .execute(&Command::FlushStop { pipeline, reset })?;
        Ok(())
    }

    pub fn pipeline_inject_eos(&self, name: &str) -> Result<()> {
        let name = require(name, "pipeline")?;
        self.gateway().execute(&Command::Eos(name))?;
        Ok(())
    }

    pub fn pipeline_seek(&self, name: &str, seek: &Seek) -> Result<()> {
        let pipeline = require(name, "pipeline")?;
        self.gateway().execute(&Command::Seek { pipeline, seek })?;
        Ok(())
    }

    pub fn pipeline_list_elements(&self, name: &str) -> Result<Vec<String>> {
        let name = require(name, "pipeline")?;
        let reply = self.gateway().execute(&Command::ListElements(name))?;
        response::child_string_array(&reply, NODES_FIELD, NAME_FIELD)
    }
}
