//! File-backed presentation surface.
//!
//! Mirrors the modal's visibility flags in memory and, once a download
//! target is set, can write the ticket to `<output_dir>/<file_name>`.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use tracing::{debug, info};

use ticketview_core::{decode_png_data_uri, PresentationSurface};

#[derive(Debug, Default)]
struct SurfaceState {
    container_visible: bool,
    loading_visible: bool,
    image_source: String,
    download: Option<(String, String)>,
}

pub struct FileSurface {
    output_dir: PathBuf,
    state: Mutex<SurfaceState>,
}

impl FileSurface {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            state: Mutex::new(SurfaceState::default()),
        }
    }

    /// Writes the current download target to disk.
    ///
    /// Returns `None` when no ticket has been displayed.
    pub async fn save(&self) -> Result<Option<PathBuf>> {
        let download = self.lock().download.clone();
        let Some((uri, file_name)) = download else {
            return Ok(None);
        };

        let bytes = decode_png_data_uri(&uri).context("Download target is not a PNG data URI")?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create output directory {:?}", self.output_dir))?;

        let path = self.output_dir.join(local_file_name(&file_name));
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write ticket to {:?}", path))?;

        info!("Saved ticket to {:?} ({} bytes)", path, bytes.len());
        Ok(Some(path))
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps a server-supplied name inside the output directory.
fn local_file_name(file_name: &str) -> String {
    file_name.replace(['/', '\\'], "_")
}

impl PresentationSurface for FileSurface {
    fn show_container(&self) {
        self.lock().container_visible = true;
        debug!("modal: shown");
    }

    fn hide_container(&self) {
        self.lock().container_visible = false;
        debug!("modal: hidden");
    }

    fn show_loading(&self) {
        self.lock().loading_visible = true;
        info!("Generating ticket...");
    }

    fn hide_loading(&self) {
        self.lock().loading_visible = false;
        debug!("modal: loading indicator hidden");
    }

    fn set_image_source(&self, uri: &str) {
        self.lock().image_source = uri.to_string();
        debug!("modal: image source set ({} chars)", uri.len());
    }

    fn set_download(&self, uri: &str, file_name: &str) {
        self.lock().download = Some((uri.to_string(), file_name.to_string()));
        debug!("modal: download target {}", file_name);
    }
}
