//! The off-screen render surface seam.
//!
//! A surface owns staged trees between `attach` and `detach`. Callers go
//! through [`StagingGuard`] so the staged copy is released on every exit
//! path, including `?` returns, panics, and a dropped future.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use image::RgbImage;
use tracing::debug;
use uuid::Uuid;

use super::geometry::{PixelSize, Rect};
use super::visual::{NodeId, VisualTree};
use super::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagingId(Uuid);

impl StagingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StagingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StagingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Laid-out boxes of a staged tree, in surface pixels, indexed by node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    rects: Vec<Option<Rect>>,
}

impl LayoutSnapshot {
    pub fn with_len(len: usize) -> Self {
        Self {
            rects: vec![None; len],
        }
    }

    pub fn set(&mut self, id: NodeId, rect: Rect) {
        if let Some(slot) = self.rects.get_mut(id) {
            *slot = Some(rect);
        }
    }

    /// `None` for nodes the surface did not lay out.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.rects.get(id).copied().flatten()
    }
}

#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Stages `tree` off-screen. Boxes are laid out at the tree's display
    /// scale, so callers stage a natural-size copy.
    async fn attach(&self, tree: Arc<VisualTree>) -> Result<StagingId, ExportError>;

    async fn measure(&self, id: StagingId) -> Result<LayoutSnapshot, ExportError>;

    /// Renders the subtree at `root` stretched onto a `target`-sized canvas.
    async fn rasterize(
        &self,
        id: StagingId,
        root: NodeId,
        target: PixelSize,
    ) -> Result<RgbImage, ExportError>;

    /// Releases a staged tree. Unknown ids are ignored.
    fn detach(&self, id: StagingId);
}

/// Detaches its staged tree when dropped.
pub struct StagingGuard<'a> {
    surface: &'a dyn RenderSurface,
    id: StagingId,
}

impl<'a> StagingGuard<'a> {
    pub async fn attach(
        surface: &'a dyn RenderSurface,
        tree: Arc<VisualTree>,
    ) -> Result<StagingGuard<'a>, ExportError> {
        let id = surface.attach(tree).await?;
        debug!(staging = %id, "Preview staged off-screen");
        Ok(Self { surface, id })
    }

    pub fn id(&self) -> StagingId {
        self.id
    }
}

impl Drop for StagingGuard<'_> {
    fn drop(&mut self) {
        self.surface.detach(self.id);
        debug!(staging = %self.id, "Staged preview detached");
    }
}
