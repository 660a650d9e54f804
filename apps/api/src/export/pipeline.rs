//! Preview → PDF export.
//!
//! Steps, in order: detach a natural-size copy of the preview, stage it on the
//! surface, wait for the settle delay, measure, find the render root,
//! rasterize, map link boxes onto the page, write the PDF. The staged copy is
//! released when the guard drops, on success and on every failure.
//!
//! There is no timeout and no cancellation hook; a hung surface hangs the
//! export.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::geometry::PageGeometry;
use super::overlay::{collect_links, map_link_overlays};
use super::pdf::write_pdf;
use super::surface::{RenderSurface, StagingGuard};
use super::visual::VisualTree;
use super::ExportError;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_RASTER_SCALE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Fixed wait between staging and measuring, for fonts and images to land.
    pub settle_delay: Duration,
    /// Raster pixels per CSS pixel of the output page.
    pub raster_scale: f32,
    pub page: PageGeometry,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            raster_scale: DEFAULT_RASTER_SCALE,
            page: PageGeometry::A4,
        }
    }
}

pub async fn export_pdf(
    surface: &dyn RenderSurface,
    preview: &VisualTree,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let target = options.page.pixel_size(options.raster_scale).ok_or_else(|| {
        ExportError::Raster(format!("invalid raster scale {}", options.raster_scale))
    })?;

    let staged = Arc::new(preview.detached_clone());
    let guard = StagingGuard::attach(surface, Arc::clone(&staged)).await?;

    debug!(delay_ms = options.settle_delay.as_millis() as u64, "Waiting for staged preview to settle");
    tokio::time::sleep(options.settle_delay).await;

    let layout = surface.measure(guard.id()).await?;
    let root = staged
        .find_render_root()
        .ok_or(ExportError::RenderRootMissing)?;

    let raster = surface
        .rasterize(guard.id(), root, target)
        .await?;

    let (subtree, links) = collect_links(&staged, root, &layout)?;
    let overlays = map_link_overlays(subtree, options.page, &links);

    let bytes = write_pdf(&raster, options.page, &overlays)?;
    info!(
        width = raster.width(),
        height = raster.height(),
        overlays = overlays.len(),
        bytes = bytes.len(),
        "PDF exported"
    );
    Ok(bytes)
}
