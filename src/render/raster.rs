//! SVG to pixels through `usvg` and `resvg`.

use std::sync::{Arc, OnceLock};

use crate::{
    foundation::{
        core::Canvas,
        error::{ArcmapError, ArcmapResult},
    },
    render::backend::FrameRGBA,
};

const MAX_DIM: u32 = 16_384;

/// System font database, loaded once per process.
fn fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    Arc::clone(DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    }))
}

/// Parse `svg` into a render tree.
pub fn parse_svg(svg: &str) -> ArcmapResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: fontdb(),
        ..Default::default()
    };
    usvg::Tree::from_str(svg, &opts)
        .map_err(|e| ArcmapError::evaluation(format!("svg parse failed: {e}")))
}

/// Rasterize `svg`, scaling its document size to fill `canvas`.
#[tracing::instrument(level = "debug", skip(svg), fields(bytes = svg.len()))]
pub fn rasterize_svg(svg: &str, canvas: Canvas) -> ArcmapResult<FrameRGBA> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(ArcmapError::validation("raster size must be non-zero"));
    }
    if canvas.width > MAX_DIM || canvas.height > MAX_DIM {
        return Err(ArcmapError::validation(format!(
            "raster size too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
            canvas.width, canvas.height
        )));
    }

    let tree = parse_svg(svg)?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| ArcmapError::evaluation("failed to allocate pixmap"))?;

    let size = tree.size();
    let sx = (canvas.width as f32) / size.width();
    let sy = (canvas.height as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.take(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
