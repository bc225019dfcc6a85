//! Image embedding as base64 data URIs.

use crate::config::ReportConfig;
use base64::Engine;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read image {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Mime type from the file extension; unknown extensions are treated as JPEG.
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

pub fn encode(bytes: &[u8], mime: &str) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{data}")
}

/// Read an image and return it as a `data:` URI.
pub fn data_uri(path: &Path) -> Result<String, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Encoded {} ({} bytes)", path.display(), bytes.len());
    Ok(encode(&bytes, mime_type(path)))
}

/// Every image the report embeds, already encoded
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    pub logo: String,
    pub hero: String,
    pub grid: Vec<String>,
    /// One per team member, in config order
    pub headshots: Vec<String>,
}

impl ImageSet {
    /// Encode all configured images, resolving paths against `root`.
    /// Fails on the first missing file.
    pub fn load(config: &ReportConfig, root: &Path) -> Result<Self, AssetError> {
        let load = |p: &Path| data_uri(&root.join(p));
        log::info!("Encoding images...");
        let images = Self {
            logo: load(config.branding.logo.as_path())?,
            hero: load(config.photos.hero.as_path())?,
            grid: config
                .photos
                .grid
                .iter()
                .map(|p| load(p.as_path()))
                .collect::<Result<_, _>>()?,
            headshots: config
                .team
                .iter()
                .map(|m| load(m.headshot.as_path()))
                .collect::<Result<_, _>>()?,
        };
        log::info!("Images encoded.");
        Ok(images)
    }
}
