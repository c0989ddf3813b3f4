//! Serve command - run the HTTP API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use super::{block_on, get_context, get_logger, log_event};
use crate::output;
use crate::server::{router, AppState};
use gastos_core::{EntryPoint, LogEvent};

pub fn run(addr: &str, no_auth: bool) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", addr))?;

    let ctx = get_context()?;
    let gate = if no_auth {
        output::warning("Authentication disabled: every caller can read the sheet");
        None
    } else {
        ctx.identity_gate()?
    };
    if gate.is_none() && !no_auth {
        output::warning("Authentication disabled in settings: every caller can read the sheet");
    }

    let logger = get_logger(EntryPoint::Server);
    log_event(
        &logger,
        LogEvent::new("server_started").with_source(ctx.dashboard_service.source_name()),
    );

    println!(
        "{} on http://{} ({})",
        "Serving".green().bold(),
        addr,
        ctx.dashboard_service.source_name()
    );

    let state = Arc::new(AppState {
        dashboard: ctx.dashboard_service,
        gate,
        logger,
    });

    block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, router(state))
            .await
            .context("Server stopped unexpectedly")
    })?
}
