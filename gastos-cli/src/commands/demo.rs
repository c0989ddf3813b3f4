//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_gastos_dir;
use crate::output;
use gastos_core::services::DemoService;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let gastos_dir = get_gastos_dir()?;
    let demo_service = DemoService::new(&gastos_dir);

    match command {
        Some(DemoCommands::On) => {
            demo_service.enable()?;
            output::success("Demo mode enabled");
            println!("Reads now use the built-in sample sheet. Try 'gastos read'.");
        }
        Some(DemoCommands::Off) => {
            demo_service.disable()?;
            output::warning("Demo mode disabled");
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
        }
    }
    Ok(())
}
