//! PDF export: renders the preview off-screen and maps its links onto the page.
//!
//! Flow: [`preview`] builds the tree, [`pipeline`] stages a detached copy on a
//! [`surface::RenderSurface`], rasterizes it, maps link boxes with
//! [`overlay`], and hands both to [`pdf`].

pub mod font_metrics;
pub mod geometry;
pub mod handlers;
pub mod metric_surface;
pub mod overlay;
pub mod pdf;
pub mod pipeline;
pub mod preview;
pub mod surface;
pub mod visual;

use thiserror::Error;

pub use geometry::PageGeometry;
pub use pipeline::{export_pdf, ExportOptions};
pub use surface::{RenderSurface, StagingId};

#[derive(Debug, Error)]
pub enum ExportError {
    /// The staged copy has no node marked as the render root.
    #[error("render root not found in staged preview")]
    RenderRootMissing,

    #[error("unknown staging id {0}")]
    UnknownStaging(StagingId),

    #[error("layout failed: {0}")]
    Layout(String),

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}
