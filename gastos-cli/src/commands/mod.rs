//! CLI command implementations

pub mod aggregate;
pub mod demo;
pub mod doctor;
pub mod logs;
pub mod read;
pub mod serve;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use gastos_core::{EntryPoint, GastosContext, LogEvent, LoggingService};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger(entry_point: EntryPoint) -> Option<LoggingService> {
    let gastos_dir = get_gastos_dir().ok()?;
    std::fs::create_dir_all(&gastos_dir).ok()?;
    LoggingService::new(&gastos_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the gastos directory from environment or default
pub fn get_gastos_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("GASTOS_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".gastos"))
        .context("Could not find home directory; set GASTOS_DIR")
}

/// Get gastos context
pub fn get_context() -> Result<GastosContext> {
    let gastos_dir = get_gastos_dir()?;

    std::fs::create_dir_all(&gastos_dir)
        .with_context(|| format!("Failed to create gastos directory: {:?}", gastos_dir))?;

    GastosContext::new(&gastos_dir).context("Failed to initialize gastos context")
}

/// Run a future to completion on a fresh runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
