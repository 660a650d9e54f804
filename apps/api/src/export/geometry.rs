//! Plain geometry shared by layout, overlay mapping, and PDF output.
//!
//! Surface coordinates are CSS pixels with a top-left origin. Page
//! coordinates are PDF points, also top-left until the PDF writer flips them.

use serde::{Deserialize, Serialize};

/// CSS reference resolution.
pub const CSS_PX_PER_INCH: f32 = 96.0;
pub const MM_PER_INCH: f32 = 25.4;
pub const PT_PER_INCH: f32 = 72.0;

pub fn mm_to_px(mm: f32) -> f32 {
    mm / MM_PER_INCH * CSS_PX_PER_INCH
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Positive and finite in both dimensions.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// This rect expressed relative to `origin`'s top-left corner.
    pub fn relative_to(&self, origin: &Rect) -> Rect {
        Rect::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Every coordinate multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Integer raster dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

/// Physical size of the output page in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageGeometry {
    /// ISO A4, 210 × 297 mm.
    pub const A4: PageGeometry = PageGeometry {
        width_pt: 595.28,
        height_pt: 841.89,
    };

    /// Raster dimensions for this page at CSS resolution times `scale`.
    ///
    /// `None` when `scale` is not a positive finite number.
    pub fn pixel_size(&self, scale: f32) -> Option<PixelSize> {
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let px_per_pt = CSS_PX_PER_INCH / PT_PER_INCH * scale;
        Some(PixelSize {
            width: (self.width_pt * px_per_pt).round().max(1.0) as u32,
            height: (self.height_pt * px_per_pt).round().max(1.0) as u32,
        })
    }
}

/// A4 at CSS resolution, the natural size of every preview page.
pub fn a4_natural_px() -> Size {
    Size::new(mm_to_px(210.0), mm_to_px(297.0))
}
