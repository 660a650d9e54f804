//! Headless render surface driven by static font metrics.
//!
//! Layout is a simplified box model: blocks stack their children vertically,
//! rows pack inline leaves left to right (wrapping when they run out of room),
//! and text wraps greedily on word boundaries. The raster is a greeked proof:
//! every word becomes a solid bar of its measured width, links are blue and
//! underlined, and headings carry a rule.
//!
//! Boxes come out at the staged tree's display scale, the way a browser
//! reports boxes for a CSS-scaled element.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use tracing::{debug, warn};

use super::font_metrics::FontMetricTable;
use super::geometry::{PixelSize, Rect};
use super::surface::{LayoutSnapshot, RenderSurface, StagingId};
use super::visual::{Color, Justify, NodeId, NodeKind, TextStyle, VisualTree, RULE_GRAY};
use super::ExportError;

/// Largest raster edge the surface will allocate.
pub const MAX_RASTER_EDGE_PX: u32 = 16_384;

const LIST_INDENT_PX: f32 = 16.0;
const RULE_THICKNESS_PX: f32 = 1.5;
const PAPER: Color = 0xff_ff_ff;

// ────────────────────────────────────────────────────────────────────────────
// Surface
// ────────────────────────────────────────────────────────────────────────────

struct StagedTree {
    tree: Arc<VisualTree>,
    layout: Option<Arc<Layout>>,
}

#[derive(Default)]
pub struct MetricLayoutSurface {
    staged: Mutex<HashMap<StagingId, StagedTree>>,
}

impl MetricLayoutSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trees currently attached.
    #[cfg(test)]
    pub fn staged_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StagingId, StagedTree>> {
        // A panic while holding the lock leaves the map itself consistent.
        self.staged.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn layout_of(&self, id: StagingId) -> Result<Arc<Layout>, ExportError> {
        let mut staged = self.lock();
        let entry = staged.get_mut(&id).ok_or(ExportError::UnknownStaging(id))?;
        if let Some(layout) = &entry.layout {
            return Ok(Arc::clone(layout));
        }
        let layout = Arc::new(LayoutEngine::run(&entry.tree)?);
        entry.layout = Some(Arc::clone(&layout));
        Ok(layout)
    }
}

#[async_trait]
impl RenderSurface for MetricLayoutSurface {
    async fn attach(&self, tree: Arc<VisualTree>) -> Result<StagingId, ExportError> {
        let id = StagingId::new();
        self.lock().insert(id, StagedTree { tree, layout: None });
        Ok(id)
    }

    async fn measure(&self, id: StagingId) -> Result<LayoutSnapshot, ExportError> {
        Ok(self.layout_of(id)?.snapshot.clone())
    }

    async fn rasterize(
        &self,
        id: StagingId,
        root: NodeId,
        target: PixelSize,
    ) -> Result<RgbImage, ExportError> {
        let layout = self.layout_of(id)?;
        let tree = {
            let staged = self.lock();
            let entry = staged.get(&id).ok_or(ExportError::UnknownStaging(id))?;
            Arc::clone(&entry.tree)
        };
        paint(&tree, &layout, root, target)
    }

    fn detach(&self, id: StagingId) {
        if self.lock().remove(&id).is_none() {
            warn!(staging = %id, "Detach requested for unknown staging id");
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct Paint {
    owner: NodeId,
    rect: Rect,
    color: Color,
}

#[derive(Debug, Clone)]
struct Layout {
    snapshot: LayoutSnapshot,
    paint: Vec<Paint>,
}

struct LayoutEngine<'t> {
    tree: &'t VisualTree,
    metrics: &'static FontMetricTable,
    snapshot: LayoutSnapshot,
    paint: Vec<Paint>,
}

/// An inline leaf inside a row, measured on one line.
struct InlineItem<'t> {
    id: NodeId,
    text: String,
    style: &'t TextStyle,
    underline: bool,
    width: f32,
}

impl<'t> LayoutEngine<'t> {
    fn run(tree: &'t VisualTree) -> Result<Layout, ExportError> {
        let mut engine = LayoutEngine {
            tree,
            metrics: tree.font().metrics(),
            snapshot: LayoutSnapshot::with_len(tree.node_count()),
            paint: Vec::new(),
        };
        let width = tree.natural_size().width;
        engine.node(VisualTree::ROOT, 0.0, 0.0, width)?;
        debug!(nodes = tree.node_count(), marks = engine.paint.len(), "Preview laid out");

        let scale = tree.display_scale();
        if scale != 1.0 {
            engine.apply_display_scale(scale);
        }
        Ok(Layout {
            snapshot: engine.snapshot,
            paint: engine.paint,
        })
    }

    fn apply_display_scale(&mut self, scale: f32) {
        for id in 0..self.tree.node_count() {
            if let Some(rect) = self.snapshot.rect(id) {
                self.snapshot.set(id, rect.scaled(scale));
            }
        }
        for item in &mut self.paint {
            item.rect = item.rect.scaled(scale);
        }
    }

    /// Lays out `id` with its top-left at `(x, y)`; returns the height used.
    fn node(&mut self, id: NodeId, x: f32, y: f32, width: f32) -> Result<f32, ExportError> {
        let tree = self.tree;
        let node = tree
            .node(id)
            .ok_or_else(|| ExportError::Layout(format!("node {id} does not exist")))?;

        let (rect_width, height) = match &node.kind {
            NodeKind::Block {
                padding_px,
                gap_px,
                min_height_px,
            } => {
                let inner_width = (width - 2.0 * padding_px).max(0.0);
                let mut cursor = y + padding_px;
                for (i, &child) in node.children.iter().enumerate() {
                    if i > 0 {
                        cursor += gap_px;
                    }
                    cursor += self.node(child, x + padding_px, cursor, inner_width)?;
                    cursor += tree.node(child).map_or(0.0, |c| c.margin_bottom_px);
                }
                let height = (cursor - y + padding_px).max(*min_height_px);
                (width, height)
            }
            NodeKind::Row { justify, gap_px } => {
                let height = self.row(id, &node.children, *justify, *gap_px, x, y, width)?;
                (width, height)
            }
            NodeKind::Text { content, style } => self.paragraph(id, content, style, false, x, y, width),
            NodeKind::Link { content, style, .. } => self.paragraph(id, content, style, true, x, y, width),
            NodeKind::Heading { content, style } => {
                let (_, text_height) = self.paragraph(id, content, style, false, x, y, width);
                let rule_y = y + text_height + 2.0;
                self.mark(id, Rect::new(x, rule_y, width, RULE_THICKNESS_PX), RULE_GRAY);
                (width, text_height + 4.0 + RULE_THICKNESS_PX)
            }
            NodeKind::ListItem { content, style } => {
                let lh = style.line_height();
                let dot = style.size_px * 0.3;
                self.mark(
                    id,
                    Rect::new(x + 4.0, y + (lh - dot) / 2.0, dot, dot),
                    style.color,
                );
                let text_width = (width - LIST_INDENT_PX).max(0.0);
                let (used, height) =
                    self.paragraph(id, content, style, false, x + LIST_INDENT_PX, y, text_width);
                (used + LIST_INDENT_PX, height)
            }
        };

        self.snapshot.set(id, Rect::new(x, y, rect_width, height));
        Ok(height)
    }

    /// Wraps text into `width`, paints its words, and returns `(width used, height)`.
    #[allow(clippy::too_many_arguments)]
    fn paragraph(
        &mut self,
        id: NodeId,
        content: &str,
        style: &TextStyle,
        underline: bool,
        x: f32,
        y: f32,
        width: f32,
    ) -> (f32, f32) {
        let text = display_text(content, style);
        let lines = self.metrics.wrap(&text, width, style.size_px, style.bold);
        let lh = style.line_height();
        let mut used = 0.0_f32;
        for (i, line) in lines.iter().enumerate() {
            let line_y = y + i as f32 * lh;
            for word in &line.words {
                self.word(id, style, underline, x + word.x_offset, line_y, word.width);
            }
            used = used.max(line.width);
        }
        (used, lines.len() as f32 * lh)
    }

    #[allow(clippy::too_many_arguments)]
    fn row(
        &mut self,
        id: NodeId,
        children: &[NodeId],
        justify: Justify,
        gap: f32,
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<f32, ExportError> {
        let tree = self.tree;
        let mut items = Vec::with_capacity(children.len());
        for &child in children {
            let kind = tree.node(child).map(|n| &n.kind);
            let (content, style, underline) = match kind {
                Some(NodeKind::Text { content, style }) => (content, style, false),
                Some(NodeKind::Link { content, style, .. }) => (content, style, true),
                _ => {
                    return Err(ExportError::Layout(format!(
                        "row {id} holds non-inline child {child}"
                    )))
                }
            };
            let text = display_text(content, style);
            let width = self.metrics.measure_px(&text, style.size_px, style.bold);
            items.push(InlineItem {
                id: child,
                text,
                style,
                underline,
                width,
            });
        }

        // Pack items into lines; an item wider than the row gets lines of its own.
        let mut cursor_y = y;
        let mut line: Vec<InlineItem> = Vec::new();
        let mut line_width = 0.0_f32;
        for item in items {
            if item.width > width {
                cursor_y += self.row_line(std::mem::take(&mut line), justify, gap, x, cursor_y, width);
                line_width = 0.0;
                let (used, height) =
                    self.paragraph(item.id, &item.text, item.style, item.underline, x, cursor_y, width);
                self.snapshot.set(item.id, Rect::new(x, cursor_y, used, height));
                cursor_y += height;
                continue;
            }
            let needed = if line.is_empty() { item.width } else { line_width + gap + item.width };
            if !line.is_empty() && needed > width {
                cursor_y += self.row_line(std::mem::take(&mut line), justify, gap, x, cursor_y, width);
                line_width = item.width;
            } else {
                line_width = needed;
            }
            line.push(item);
        }
        cursor_y += self.row_line(line, justify, gap, x, cursor_y, width);
        Ok(cursor_y - y)
    }

    /// Places one packed line of a row; returns its height.
    fn row_line(&mut self, line: Vec<InlineItem>, justify: Justify, gap: f32, x: f32, y: f32, width: f32) -> f32 {
        if line.is_empty() {
            return 0.0;
        }
        let content: f32 = line.iter().map(|i| i.width).sum();
        let gaps = gap * (line.len() - 1) as f32;
        let (mut cursor, spacing) = match justify {
            Justify::Start => (x, gap),
            Justify::Center => (x + ((width - content - gaps) / 2.0).max(0.0), gap),
            Justify::Between if line.len() == 1 => (x, gap),
            Justify::Between => (x, ((width - content) / (line.len() - 1) as f32).max(gap)),
        };

        let mut height = 0.0_f32;
        for item in &line {
            let lh = item.style.line_height();
            let (used, _) = self.paragraph(item.id, &item.text, item.style, item.underline, cursor, y, f32::INFINITY);
            self.snapshot.set(item.id, Rect::new(cursor, y, used, lh));
            cursor += item.width + spacing;
            height = height.max(lh);
        }
        height
    }

    fn word(&mut self, owner: NodeId, style: &TextStyle, underline: bool, x: f32, line_y: f32, width: f32) {
        let lh = style.line_height();
        let bar = style.size_px * if style.bold { 0.62 } else { 0.5 };
        self.mark(owner, Rect::new(x, line_y + (lh - bar) / 2.0, width, bar), style.color);
        if underline {
            self.mark(owner, Rect::new(x, line_y + lh * 0.82, width, 1.0), style.color);
        }
    }

    fn mark(&mut self, owner: NodeId, rect: Rect, color: Color) {
        self.paint.push(Paint {
            owner,
            rect,
            color,
        });
    }
}

fn display_text(content: &str, style: &TextStyle) -> String {
    if style.uppercase {
        content.to_uppercase()
    } else {
        content.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Raster
// ────────────────────────────────────────────────────────────────────────────

/// Stretches the root's frame onto a `target` canvas, each axis on its own.
fn paint(tree: &VisualTree, layout: &Layout, root: NodeId, target: PixelSize) -> Result<RgbImage, ExportError> {
    let (width, height) = (target.width, target.height);
    if width == 0 || height == 0 || width > MAX_RASTER_EDGE_PX || height > MAX_RASTER_EDGE_PX {
        return Err(ExportError::Raster(format!(
            "raster size {width}x{height} outside 1..={MAX_RASTER_EDGE_PX}"
        )));
    }
    let frame = layout
        .snapshot
        .rect(root)
        .ok_or_else(|| ExportError::Layout(format!("node {root} was not laid out")))?;
    if !(frame.width > 0.0 && frame.height > 0.0) {
        return Err(ExportError::Raster(format!(
            "render root {root} has an empty frame {}x{}",
            frame.width, frame.height
        )));
    }

    let sx = width as f32 / frame.width;
    let sy = height as f32 / frame.height;
    let mut image = RgbImage::from_pixel(width, height, rgb(PAPER));
    let inside: HashSet<NodeId> = tree.descendants(root).into_iter().collect();
    for item in layout.paint.iter().filter(|p| inside.contains(&p.owner)) {
        let rect = item.rect.relative_to(&frame);
        fill(
            &mut image,
            Rect::new(rect.x * sx, rect.y * sy, rect.width * sx, rect.height * sy),
            rgb(item.color),
        );
    }

    debug!(width = image.width(), height = image.height(), "Preview rasterized");
    Ok(image)
}

fn rgb(color: Color) -> Rgb<u8> {
    Rgb([(color >> 16) as u8, (color >> 8) as u8, color as u8])
}

fn fill(image: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    let x0 = rect.x.max(0.0).floor() as u32;
    let y0 = rect.y.max(0.0).floor() as u32;
    let x1 = (rect.right().ceil().max(0.0) as u32).min(image.width());
    let y1 = (rect.bottom().ceil().max(0.0) as u32).min(image.height());
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::font_metrics::FontFamily;
    use crate::export::geometry::Size;
    use crate::export::visual::LINK_BLUE;

    fn page_tree() -> (VisualTree, NodeId, NodeId) {
        let mut tree = VisualTree::new(FontFamily::Inter, Size::new(400.0, 300.0));
        let page = tree.push(
            VisualTree::ROOT,
            NodeKind::Block {
                padding_px: 20.0,
                gap_px: 0.0,
                min_height_px: 300.0,
            },
        );
        tree.mark_render_root(page);
        let row = tree.push(
            page,
            NodeKind::Row {
                justify: Justify::Between,
                gap_px: 8.0,
            },
        );
        tree.push(
            row,
            NodeKind::Text {
                content: "Left".to_string(),
                style: TextStyle::regular(14.0),
            },
        );
        let link = tree.push(
            row,
            NodeKind::Link {
                href: "https://example.com".to_string(),
                content: "Right".to_string(),
                style: TextStyle::regular(14.0).color(LINK_BLUE),
            },
        );
        (tree, page, link)
    }

    #[tokio::test]
    async fn test_measure_places_between_row_edges() {
        let (tree, page, link) = page_tree();
        let surface = MetricLayoutSurface::new();
        let id = surface.attach(Arc::new(tree)).await.unwrap();
        let snapshot = surface.measure(id).await.unwrap();

        let page_rect = snapshot.rect(page).unwrap();
        assert_eq!(page_rect, Rect::new(0.0, 0.0, 400.0, 300.0));

        let link_rect = snapshot.rect(link).unwrap();
        assert!((link_rect.right() - 380.0).abs() < 1e-3, "{link_rect:?}");
        assert_eq!(link_rect.y, 20.0);
        assert!(link_rect.width > 0.0);
    }

    #[tokio::test]
    async fn test_rasterize_scales_root_and_draws_links_blue() {
        let (tree, page, link) = page_tree();
        let surface = MetricLayoutSurface::new();
        let id = surface.attach(Arc::new(tree)).await.unwrap();
        let snapshot = surface.measure(id).await.unwrap();
        let target = PixelSize {
            width: 800,
            height: 600,
        };
        let image = surface.rasterize(id, page, target).await.unwrap();
        assert_eq!((image.width(), image.height()), (800, 600));

        let r = snapshot.rect(link).unwrap();
        let cx = ((r.x + r.width / 2.0) * 2.0) as u32;
        let cy = ((r.y + r.height / 2.0) * 2.0) as u32;
        let found_blue = (cy.saturating_sub(4)..cy + 4)
            .flat_map(|y| (cx.saturating_sub(8)..cx + 8).map(move |x| (x, y)))
            .any(|(x, y)| *image.get_pixel(x, y) == rgb(LINK_BLUE));
        assert!(found_blue);
        assert_eq!(*image.get_pixel(0, 0), rgb(PAPER));
    }

    #[tokio::test]
    async fn test_rasterize_rejects_out_of_range_target() {
        let (tree, page, _) = page_tree();
        let surface = MetricLayoutSurface::new();
        let id = surface.attach(Arc::new(tree)).await.unwrap();
        for (width, height) in [(0, 600), (800, MAX_RASTER_EDGE_PX + 1)] {
            let err = surface
                .rasterize(id, page, PixelSize { width, height })
                .await
                .unwrap_err();
            assert!(matches!(err, ExportError::Raster(_)));
        }
    }

    #[tokio::test]
    async fn test_tall_root_is_squeezed_onto_target() {
        let mut tree = VisualTree::new(FontFamily::Inter, Size::new(400.0, 300.0));
        let page = tree.push(
            VisualTree::ROOT,
            NodeKind::Block {
                padding_px: 10.0,
                gap_px: 4.0,
                min_height_px: 300.0,
            },
        );
        tree.mark_render_root(page);
        for _ in 0..2_000 {
            tree.push(
                page,
                NodeKind::Text {
                    content: "Line".to_string(),
                    style: TextStyle::regular(14.0),
                },
            );
        }
        let surface = MetricLayoutSurface::new();
        let id = surface.attach(Arc::new(tree)).await.unwrap();
        let frame = surface.measure(id).await.unwrap().rect(page).unwrap();
        assert!(frame.height > MAX_RASTER_EDGE_PX as f32);

        let target = PixelSize {
            width: 400,
            height: 300,
        };
        let image = surface.rasterize(id, page, target).await.unwrap();
        assert_eq!((image.width(), image.height()), (400, 300));
    }

    #[tokio::test]
    async fn test_measure_reports_boxes_at_display_scale() {
        let (tree, page, link) = page_tree();
        let surface = MetricLayoutSurface::new();
        let natural = surface.attach(Arc::new(tree.clone())).await.unwrap();
        let scaled = surface
            .attach(Arc::new(tree.with_display_scale(0.5)))
            .await
            .unwrap();

        let full = surface.measure(natural).await.unwrap();
        let half = surface.measure(scaled).await.unwrap();
        assert_eq!(half.rect(page), Some(Rect::new(0.0, 0.0, 200.0, 150.0)));
        assert_eq!(half.rect(link), full.rect(link).map(|r| r.scaled(0.5)));
    }

    #[tokio::test]
    async fn test_unknown_staging_id() {
        let surface = MetricLayoutSurface::new();
        let err = surface.measure(StagingId::new()).await.unwrap_err();
        assert!(matches!(err, ExportError::UnknownStaging(_)));
    }

    #[tokio::test]
    async fn test_detach_removes_staged_tree() {
        let (tree, _, _) = page_tree();
        let surface = MetricLayoutSurface::new();
        let id = surface.attach(Arc::new(tree)).await.unwrap();
        assert_eq!(surface.staged_count(), 1);
        surface.detach(id);
        assert_eq!(surface.staged_count(), 0);
        surface.detach(id);
    }

    #[tokio::test]
    async fn test_row_with_block_child_is_a_layout_error() {
        let mut tree = VisualTree::new(FontFamily::Inter, Size::new(400.0, 300.0));
        let row = tree.push(
            VisualTree::ROOT,
            NodeKind::Row {
                justify: Justify::Start,
                gap_px: 0.0,
            },
        );
        tree.push(
            row,
            NodeKind::Block {
                padding_px: 0.0,
                gap_px: 0.0,
                min_height_px: 0.0,
            },
        );
        let surface = MetricLayoutSurface::new();
        let id = surface.attach(Arc::new(tree)).await.unwrap();
        assert!(matches!(surface.measure(id).await, Err(ExportError::Layout(_))));
    }

    #[tokio::test]
    async fn test_long_text_wraps_inside_block() {
        let mut tree = VisualTree::new(FontFamily::ComputerModern, Size::new(200.0, 100.0));
        let text = tree.push(
            VisualTree::ROOT,
            NodeKind::ListItem {
                content: "word ".repeat(40),
                style: TextStyle::regular(12.0),
            },
        );
        let surface = MetricLayoutSurface::new();
        let id = surface.attach(Arc::new(tree)).await.unwrap();
        let rect = surface.measure(id).await.unwrap().rect(text).unwrap();
        assert!(rect.width <= 200.0);
        assert!(rect.height > TextStyle::regular(12.0).line_height() * 2.0);
    }
}
