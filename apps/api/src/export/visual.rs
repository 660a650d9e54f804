//! Arena-backed model of the on-screen résumé preview.
//!
//! The preview is a small tree of blocks, rows, and text leaves. Exactly one
//! node may be marked as the render root; everything the exporter rasterizes
//! and every link it maps lives inside that node's subtree.

use serde::{Deserialize, Serialize};

use super::font_metrics::FontFamily;
use super::geometry::Size;

pub type NodeId = usize;

/// Packed 0xRRGGBB.
pub type Color = u32;

pub const INK: Color = 0x1f_29_37;
pub const MUTED: Color = 0x4b_55_63;
pub const LINK_BLUE: Color = 0x25_63_eb;
pub const RULE_GRAY: Color = 0x9c_a3_af;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_px: f32,
    pub bold: bool,
    pub italic: bool,
    pub uppercase: bool,
    pub color: Color,
}

impl TextStyle {
    pub const fn regular(size_px: f32) -> Self {
        Self {
            size_px,
            bold: false,
            italic: false,
            uppercase: false,
            color: INK,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    pub const fn uppercase(self) -> Self {
        Self {
            uppercase: true,
            ..self
        }
    }

    pub const fn color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn line_height(&self) -> f32 {
        self.size_px * 1.4
    }
}

/// Main-axis distribution for a row's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justify {
    Start,
    Center,
    /// First child flush left, last flush right, the rest spread between.
    Between,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Vertical stack of children.
    Block {
        padding_px: f32,
        gap_px: f32,
        /// Lower bound on the laid-out height, e.g. a full page.
        min_height_px: f32,
    },
    /// Horizontal run of inline leaves (text and links).
    Row { justify: Justify, gap_px: f32 },
    Text { content: String, style: TextStyle },
    Link {
        href: String,
        content: String,
        style: TextStyle,
    },
    /// Section title with a rule underneath.
    Heading { content: String, style: TextStyle },
    /// Bulleted paragraph, hanging indent.
    ListItem { content: String, style: TextStyle },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub margin_bottom_px: f32,
    pub render_root: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualTree {
    nodes: Vec<Node>,
    font: FontFamily,
    natural_size: Size,
    /// CSS-style scale applied to the on-screen copy. Surfaces report boxes
    /// at this scale.
    display_scale: f32,
}

impl VisualTree {
    /// A tree holding a single unpadded block at index 0.
    pub fn new(font: FontFamily, natural_size: Size) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Block {
                    padding_px: 0.0,
                    gap_px: 0.0,
                    min_height_px: 0.0,
                },
                parent: None,
                children: Vec::new(),
                margin_bottom_px: 0.0,
                render_root: false,
            }],
            font,
            natural_size,
            display_scale: 1.0,
        }
    }

    pub const ROOT: NodeId = 0;

    pub fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            margin_bottom_px: 0.0,
            render_root: false,
        });
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    pub fn set_margin_bottom(&mut self, id: NodeId, px: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.margin_bottom_px = px;
        }
    }

    /// Marks `id` as the render root, clearing any previous mark.
    pub fn mark_render_root(&mut self, id: NodeId) {
        for node in &mut self.nodes {
            node.render_root = false;
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.render_root = true;
        }
    }

    pub fn find_render_root(&self) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.render_root)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Always at least one: the root block.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn font(&self) -> FontFamily {
        self.font
    }

    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    pub fn display_scale(&self) -> f32 {
        self.display_scale
    }

    /// The tree as an on-screen copy scaled by `scale`.
    #[cfg(test)]
    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.display_scale = scale;
        self
    }

    /// Deep copy for off-screen staging, at natural (unscaled) size.
    pub fn detached_clone(&self) -> VisualTree {
        VisualTree {
            display_scale: 1.0,
            ..self.clone()
        }
    }

    /// Pre-order walk of `from` and its descendants.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Hyperlink nodes inside the subtree at `from`, in document order.
    pub fn links_within(&self, from: NodeId) -> Vec<(NodeId, &str)> {
        self.descendants(from)
            .into_iter()
            .filter_map(|id| match &self.nodes[id].kind {
                NodeKind::Link { href, .. } => Some((id, href.as_str())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str) -> NodeKind {
        NodeKind::Link {
            href: href.to_string(),
            content: href.to_string(),
            style: TextStyle::regular(12.0),
        }
    }

    fn block() -> NodeKind {
        NodeKind::Block {
            padding_px: 0.0,
            gap_px: 0.0,
            min_height_px: 0.0,
        }
    }

    #[test]
    fn test_render_root_marker_is_unique() {
        let mut tree = VisualTree::new(FontFamily::Inter, Size::new(100.0, 100.0));
        let a = tree.push(VisualTree::ROOT, block());
        let b = tree.push(VisualTree::ROOT, block());
        tree.mark_render_root(a);
        tree.mark_render_root(b);
        assert_eq!(tree.find_render_root(), Some(b));
    }

    #[test]
    fn test_no_render_root_by_default() {
        let tree = VisualTree::new(FontFamily::Inter, Size::new(100.0, 100.0));
        assert_eq!(tree.find_render_root(), None);
    }

    #[test]
    fn test_links_within_only_covers_subtree() {
        let mut tree = VisualTree::new(FontFamily::Inter, Size::new(100.0, 100.0));
        let outside = tree.push(VisualTree::ROOT, link("https://outside.example"));
        let page = tree.push(VisualTree::ROOT, block());
        let row = tree.push(page, block());
        let first = tree.push(row, link("https://a.example"));
        let second = tree.push(page, link("https://b.example"));

        let links = tree.links_within(page);
        assert_eq!(
            links,
            vec![(first, "https://a.example"), (second, "https://b.example")]
        );
        assert!(!links.iter().any(|(id, _)| *id == outside));
    }

    #[test]
    fn test_detached_clone_resets_scale_and_keeps_nodes() {
        let mut tree = VisualTree::new(FontFamily::EbGaramond, Size::new(800.0, 1100.0))
            .with_display_scale(0.6);
        let page = tree.push(VisualTree::ROOT, block());
        tree.mark_render_root(page);

        let staged = tree.detached_clone();
        assert_eq!(staged.display_scale(), 1.0);
        assert_eq!(tree.display_scale(), 0.6);
        assert_eq!(staged.node_count(), tree.node_count());
        assert_eq!(staged.find_render_root(), Some(page));
        assert_eq!(staged.natural_size(), tree.natural_size());
    }
}
