//! Build command - render the HTML report to disk

use super::ConfigArgs;
use crate::core::Analysis;
use crate::render::{self, ImageSet};
use anyhow::Context;
use clap::Args;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    config: ConfigArgs,

    /// Directory that image paths in the configuration are relative to
    #[arg(short, long, default_value = ".")]
    assets: PathBuf,

    /// Output HTML file
    #[arg(short, long, default_value = "index.html")]
    output: PathBuf,

    /// Open the report in the default browser once written
    #[arg(long)]
    open: bool,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            config: ConfigArgs::default(),
            assets: PathBuf::from("."),
            output: PathBuf::from("index.html"),
            open: false,
        }
    }
}

impl BuildCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let config = self.config.load()?;
        let analysis = Analysis::compute(&config)?;
        let images = ImageSet::load(&config, &self.assets)
            .with_context(|| format!("embedding images from {}", self.assets.display()))?;

        // Fully rendered before anything touches the output path.
        let html = render::generate_html(&config, &analysis, &images);
        std::fs::write(&self.output, &html)
            .with_context(|| format!("writing {}", self.output.display()))?;

        let digest = hex::encode(Sha256::digest(html.as_bytes()));
        log::info!("Generated: {}", self.output.display());
        log::info!("Size: {:.1} KB", html.len() as f64 / 1024.0);
        log::info!("SHA-256: {digest}");
        println!("Report written to: {}", self.output.display());

        if self.open {
            opener::open(&self.output)
                .with_context(|| format!("opening {}", self.output.display()))?;
        }
        Ok(())
    }
}
