//! Demo service - manage demo mode
//!
//! Demo mode swaps the spreadsheet for a built-in sample sheet so the
//! dashboard can be tried without a service account.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;

/// Demo service for managing demo mode
pub struct DemoService {
    gastos_dir: PathBuf,
}

impl DemoService {
    pub fn new(gastos_dir: &Path) -> Self {
        Self {
            gastos_dir: gastos_dir.to_path_buf(),
        }
    }

    /// Check if demo mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.gastos_dir)?;
        Ok(config.demo_mode)
    }

    /// Enable demo mode in settings.json
    pub fn enable(&self) -> Result<()> {
        std::fs::create_dir_all(&self.gastos_dir)?;
        let mut config = Config::load(&self.gastos_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.gastos_dir)
    }

    /// Disable demo mode in settings.json
    pub fn disable(&self) -> Result<()> {
        std::fs::create_dir_all(&self.gastos_dir)?;
        let mut config = Config::load(&self.gastos_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.gastos_dir)
    }
}
