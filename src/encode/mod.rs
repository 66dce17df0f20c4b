//! Frame sinks: in-memory, PNG sequence, and MP4 through `ffmpeg`.

pub mod ffmpeg;
pub mod png;
pub mod sink;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::ArcmapResult;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ArcmapResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
