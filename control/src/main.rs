// main.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of GstPrinceOfParser
//
// SPDX-License-Identifier: GPL-3.0-only

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gpop::config::{Config, CtlCommand};
use gpop::{BusTimeout, GpopError, Manager, PropertyValue, Result};

const EXIT_ERROR: u8 = 1;
const EXIT_BUS_TIMEOUT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr, stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gpop=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    let session = match config.session() {
        Ok(session) => session,
        Err(e) => {
            error!("Cannot reach daemon at {}:{}: {}", config.host, config.port, e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    info!("Using daemon at {}", session.addr());

    let manager = Manager::with_options(Arc::new(session), config.manager_options());

    let outcome = match config.command.bus_timeout() {
        Some(timeout) => wait(&manager, config.command, timeout).await,
        None => {
            let manager = manager.clone();
            let command = config.command;
            tokio::task::spawn_blocking(move || run(&manager, command))
                .await
                .unwrap_or_else(|e| Err(GpopError::Thread(e.to_string())))
        }
    };

    match outcome {
        Ok(Some(output)) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) if e.is_timeout() => {
            error!("{}", e);
            if let Some(response) = e.response() {
                println!("{}", response);
            }
            ExitCode::from(EXIT_BUS_TIMEOUT)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Wait for a bus message, or Ctrl+C.
async fn wait(manager: &Manager, command: CtlCommand, timeout: BusTimeout) -> Result<Option<String>> {
    let CtlCommand::Wait {
        pipeline, filter, ..
    } = command
    else {
        return Err(GpopError::InvalidArgument("not a wait command".to_string()));
    };

    let configure = manager.clone();
    let future = tokio::task::spawn_blocking(move || {
        configure.bus_wait_future(&pipeline, &filter, timeout)
    })
    .await
    .map_err(|e| GpopError::Thread(e.to_string()))??;

    tokio::select! {
        result = future => result.map(Some),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, abandoning bus wait");
            Err(GpopError::Thread("interrupted".to_string()))
        }
    }
}

fn json_list(names: Vec<String>) -> Result<Option<String>> {
    Ok(Some(serde_json::to_string_pretty(&names)?))
}

fn run(manager: &Manager, command: CtlCommand) -> Result<Option<String>> {
    let seek = command.seek();

    match command {
        CtlCommand::Create { name, description } => {
            manager.pipeline_create(&name, &description.join(" "))?;
            Ok(None)
        }
        CtlCommand::Delete { name } => manager.pipeline_delete(&name).map(|_| None),
        CtlCommand::Play { name } => manager.pipeline_play(&name).map(|_| None),
        CtlCommand::Pause { name } => manager.pipeline_pause(&name).map(|_| None),
        CtlCommand::Stop { name } => manager.pipeline_stop(&name).map(|_| None),
        CtlCommand::List => json_list(manager.pipeline_list()?),
        CtlCommand::Graph { name } => manager.pipeline_get_graph(&name).map(Some),
        CtlCommand::Verbose { name, enable } => {
            manager.pipeline_verbose(&name, enable).map(|_| None)
        }
        CtlCommand::State { name } => manager
            .pipeline_get_state(&name)
            .map(|state| Some(state.to_string())),
        CtlCommand::Eos { name } => manager.pipeline_inject_eos(&name).map(|_| None),
        CtlCommand::FlushStart { name } => manager.pipeline_flush_start(&name).map(|_| None),
        CtlCommand::FlushStop { name, reset } => {
            manager.pipeline_flush_stop(&name, reset).map(|_| None)
        }
        CtlCommand::Seek { name, .. } => match seek {
            Some(seek) => manager.pipeline_seek(&name, &seek).map(|_| None),
            None => Ok(None),
        },
        CtlCommand::Elements { name } => json_list(manager.pipeline_list_elements(&name)?),
        CtlCommand::Properties { pipeline, element } => {
            json_list(manager.element_properties_list(&pipeline, &element)?)
        }
        CtlCommand::Signals { pipeline, element } => {
            json_list(manager.pipeline_list_signals(&pipeline, &element)?)
        }
        CtlCommand::Get {
            pipeline,
            element,
            property,
            kind,
        } => manager
            .element_get(&pipeline, &element, &property, kind)
            .map(|value| Some(value.to_string())),
        CtlCommand::Set {
            pipeline,
            element,
            property,
            value,
            kind,
        } => {
            let value = PropertyValue::decode(kind, &value)?;
            manager
                .element_set(&pipeline, &element, &property, &value)
                .map(|_| None)
        }
        CtlCommand::SignalConnect {
            pipeline,
            element,
            signal,
            timeout,
        } => manager
            .pipeline_signal_connect(&pipeline, &element, &signal, timeout)
            .map(Some),
        CtlCommand::SignalDisconnect {
            pipeline,
            element,
            signal,
        } => manager
            .pipeline_signal_disconnect(&pipeline, &element, &signal)
            .map(|_| None),
        CtlCommand::Debug {
            threshold,
            colors,
            reset,
        } => manager.debug(&threshold, colors, reset).map(|_| None),
        CtlCommand::Raw { command } => manager.execute(&command.join(" ")).map(Some),
        CtlCommand::Wait { .. } => Err(GpopError::InvalidArgument(
            "wait runs on the async path".to_string(),
        )),
    }
}
