//! Maps hyperlink boxes from the rendered preview onto the output page.
//!
//! The raster is stretched to fill the page, so a link keeps its position by
//! scaling each axis independently: `x' = x / subtreeWidth * pageWidth`, and
//! likewise for `y`, width, and height. All rectangles use a top-left origin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::{PageGeometry, Rect, Size};
use super::surface::LayoutSnapshot;
use super::visual::{NodeId, VisualTree};
use super::ExportError;

/// A hyperlink's box relative to the render root's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBox {
    pub rect: Rect,
    pub url: String,
}

/// A clickable region on the output page, in page units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRegion {
    pub rect: Rect,
    pub url: String,
}

/// Scales link boxes from subtree coordinates to page coordinates.
///
/// Degenerate subtree sizes (zero, negative, or non-finite) yield no regions
/// rather than infinities.
pub fn map_link_overlays(subtree: Size, page: PageGeometry, links: &[LinkBox]) -> Vec<OverlayRegion> {
    if !subtree.is_usable() {
        debug!(?subtree, "Skipping link overlays for degenerate subtree");
        return Vec::new();
    }
    let sx = page.width_pt / subtree.width;
    let sy = page.height_pt / subtree.height;

    links
        .iter()
        .map(|link| OverlayRegion {
            rect: Rect::new(
                link.rect.x * sx,
                link.rect.y * sy,
                link.rect.width * sx,
                link.rect.height * sy,
            ),
            url: link.url.clone(),
        })
        .collect()
}

/// The render root's laid-out size plus every link inside it, relative to the root.
///
/// Links the surface did not lay out are skipped.
pub fn collect_links(
    tree: &VisualTree,
    root: NodeId,
    layout: &LayoutSnapshot,
) -> Result<(Size, Vec<LinkBox>), ExportError> {
    let frame = layout
        .rect(root)
        .ok_or_else(|| ExportError::Layout(format!("render root {root} was not laid out")))?;

    let mut links = Vec::new();
    for (id, href) in tree.links_within(root) {
        match layout.rect(id) {
            Some(rect) => links.push(LinkBox {
                rect: rect.relative_to(&frame),
                url: href.to_string(),
            }),
            None => debug!(node = id, "Link has no layout box; skipped"),
        }
    }
    Ok((Size::new(frame.width, frame.height), links))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::font_metrics::FontFamily;
    use crate::export::visual::{NodeKind, TextStyle};

    fn link(x: f32, y: f32, w: f32, h: f32) -> LinkBox {
        LinkBox {
            rect: Rect::new(x, y, w, h),
            url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn test_scales_by_page_over_subtree() {
        let page = PageGeometry {
            width_pt: 200.0,
            height_pt: 400.0,
        };
        let regions = map_link_overlays(Size::new(800.0, 1000.0), page, &[link(100.0, 500.0, 80.0, 20.0)]);
        assert_eq!(regions.len(), 1);
        let r = regions[0].rect;
        for (got, want) in [(r.x, 25.0), (r.y, 200.0), (r.width, 20.0), (r.height, 8.0)] {
            assert!((got - want).abs() < 1e-4, "{r:?}");
        }
        assert_eq!(regions[0].url, "https://example.com");
    }

    #[test]
    fn test_full_subtree_maps_to_full_page() {
        let subtree = Size::new(793.7, 1122.5);
        let regions = map_link_overlays(subtree, PageGeometry::A4, &[link(0.0, 0.0, 793.7, 1122.5)]);
        let r = regions[0].rect;
        assert!((r.width - PageGeometry::A4.width_pt).abs() < 1e-3);
        assert!((r.height - PageGeometry::A4.height_pt).abs() < 1e-3);
    }

    #[test]
    fn test_preserves_order_and_count() {
        let links = vec![link(1.0, 1.0, 1.0, 1.0), link(2.0, 2.0, 1.0, 1.0), link(3.0, 3.0, 1.0, 1.0)];
        let regions = map_link_overlays(Size::new(10.0, 10.0), PageGeometry::A4, &links);
        assert_eq!(regions.len(), 3);
        assert!(regions[0].rect.x < regions[1].rect.x && regions[1].rect.x < regions[2].rect.x);
    }

    #[test]
    fn test_degenerate_subtree_yields_nothing() {
        let links = [link(1.0, 1.0, 1.0, 1.0)];
        assert!(map_link_overlays(Size::new(0.0, 100.0), PageGeometry::A4, &links).is_empty());
        assert!(map_link_overlays(Size::new(100.0, -1.0), PageGeometry::A4, &links).is_empty());
        assert!(map_link_overlays(Size::new(f32::NAN, 100.0), PageGeometry::A4, &links).is_empty());
    }

    #[test]
    fn test_no_links_no_regions() {
        assert!(map_link_overlays(Size::new(10.0, 10.0), PageGeometry::A4, &[]).is_empty());
    }

    #[test]
    fn test_collect_links_relative_to_root() {
        let mut tree = VisualTree::new(FontFamily::Inter, Size::new(100.0, 100.0));
        let page = tree.push(
            VisualTree::ROOT,
            NodeKind::Block {
                padding_px: 0.0,
                gap_px: 0.0,
                min_height_px: 0.0,
            },
        );
        let anchor = tree.push(
            page,
            NodeKind::Link {
                href: "mailto:a@b.co".to_string(),
                content: "a@b.co".to_string(),
                style: TextStyle::regular(12.0),
            },
        );
        let _unlaid = tree.push(
            page,
            NodeKind::Link {
                href: "https://skipped.example".to_string(),
                content: "skipped".to_string(),
                style: TextStyle::regular(12.0),
            },
        );

        let mut layout = LayoutSnapshot::with_len(tree.node_count());
        layout.set(page, Rect::new(50.0, 60.0, 500.0, 700.0));
        layout.set(anchor, Rect::new(70.0, 90.0, 40.0, 12.0));

        let (size, links) = collect_links(&tree, page, &layout).unwrap();
        assert_eq!(size, Size::new(500.0, 700.0));
        assert_eq!(
            links,
            vec![LinkBox {
                rect: Rect::new(20.0, 30.0, 40.0, 12.0),
                url: "mailto:a@b.co".to_string(),
            }]
        );
    }

    #[test]
    fn test_collect_links_requires_root_box() {
        let tree = VisualTree::new(FontFamily::Inter, Size::new(100.0, 100.0));
        let layout = LayoutSnapshot::with_len(tree.node_count());
        assert!(matches!(
            collect_links(&tree, VisualTree::ROOT, &layout),
            Err(ExportError::Layout(_))
        ));
    }
}
