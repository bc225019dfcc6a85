pub mod build;
pub mod matrix;
pub mod rent_roll;
pub mod schema;
pub mod summary;

use crate::config::ReportConfig;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Input selection shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Report configuration JSON (defaults to the built-in listing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rent roll CSV replacing the configured units
    #[arg(short, long)]
    rent_roll: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> anyhow::Result<ReportConfig> {
        let config = match &self.config {
            Some(path) => ReportConfig::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => ReportConfig::embedded().context("parsing built-in configuration")?,
        };
        match &self.rent_roll {
            Some(path) => config
                .with_rent_roll_csv(path)
                .with_context(|| format!("loading rent roll {}", path.display())),
            None => Ok(config),
        }
    }
}
