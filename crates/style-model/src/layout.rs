//! Fixed overlay geometry.
//!
//! Every pixel literal the compositor uses lives in [`LayoutConstants`].
//! The helper methods turn the table plus a canvas size and banner
//! thickness into concrete rectangles, so placement can be checked
//! without rasterising anything.

use crate::color::Color;
use crate::params::BannerLayout;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Geometry and styling table for all overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConstants {
    /// Left edge of brand, tagline, and contact text as fractions of width.
    pub text_columns: [f32; 3],
    /// Banner font size as a fraction of banner thickness.
    pub banner_font_ratio: f32,
    pub banner_text_color: Color,

    /// Logo side as a fraction of banner thickness.
    pub logo_ratio: f32,
    pub logo_margin_right: f32,
    pub logo_margin_bottom: f32,

    pub sticker_center: (f32, f32),
    pub sticker_radius: f32,
    /// Label center sits this far below the circle center.
    pub sticker_label_offset: f32,
    pub sticker_font_px: f32,
    pub sticker_fill: Color,
    pub sticker_text_color: Color,

    pub cta_size: (f32, f32),
    /// Distance from the banner edge up to the button's top edge.
    pub cta_gap: f32,
    /// Distance from the banner edge up to the label center.
    pub cta_label_gap: f32,
    pub cta_font_px: f32,
    pub cta_fill: Color,
    pub cta_text_color: Color,

    pub watermark_text: &'static str,
    pub watermark_opacity: f32,
    /// Watermark font size as a fraction of canvas width.
    pub watermark_font_ratio: f32,
    pub watermark_color: Color,
}

impl LayoutConstants {
    pub const DEFAULT: LayoutConstants = LayoutConstants {
        text_columns: [0.025, 1.0 / 3.0, 0.65],
        banner_font_ratio: 0.4,
        banner_text_color: Color::WHITE,

        logo_ratio: 0.8,
        logo_margin_right: 10.0,
        logo_margin_bottom: 5.0,

        sticker_center: (100.0, 100.0),
        sticker_radius: 70.0,
        sticker_label_offset: 10.0,
        sticker_font_px: 28.0,
        sticker_fill: Color::RED,
        sticker_text_color: Color::WHITE,

        cta_size: (240.0, 50.0),
        cta_gap: 60.0,
        cta_label_gap: 35.0,
        cta_font_px: 22.0,
        cta_fill: Color::rgb(0, 123, 255),
        cta_text_color: Color::WHITE,

        watermark_text: "\u{a9} My Brand",
        watermark_opacity: 0.3,
        watermark_font_ratio: 0.05,
        watermark_color: Color::BLACK,
    };

    /// Banner strip for `layout`, or `None` when no banner is drawn.
    pub fn banner_rect(
        &self,
        layout: BannerLayout,
        width: u32,
        height: u32,
        thickness: f32,
    ) -> Option<LayoutRect> {
        let (w, h) = (width as f32, height as f32);
        match layout {
            BannerLayout::None => None,
            BannerLayout::Bottom => Some(LayoutRect::new(0.0, h - thickness, w, thickness)),
            BannerLayout::Top => Some(LayoutRect::new(0.0, 0.0, w, thickness)),
            BannerLayout::Side => Some(LayoutRect::new(w - thickness, 0.0, thickness, h)),
        }
    }

    /// Vertical center of the banner text row.
    ///
    /// The side strip has no horizontal band, so its text row sits where
    /// a bottom banner's would.
    pub fn banner_text_center_y(&self, layout: BannerLayout, height: u32, thickness: f32) -> f32 {
        match layout {
            BannerLayout::Top => thickness / 2.0,
            _ => height as f32 - thickness / 2.0,
        }
    }

    /// Left edges of the three banner text fields.
    pub fn text_column_x(&self, width: u32) -> [f32; 3] {
        self.text_columns.map(|fraction| width as f32 * fraction)
    }

    pub fn banner_font_px(&self, thickness: f32) -> f32 {
        thickness * self.banner_font_ratio
    }

    /// Square logo slot anchored to the bottom-right corner.
    pub fn logo_rect(&self, width: u32, height: u32, thickness: f32) -> LayoutRect {
        let size = thickness * self.logo_ratio;
        LayoutRect::new(
            width as f32 - size - self.logo_margin_right,
            height as f32 - size - self.logo_margin_bottom,
            size,
            size,
        )
    }

    pub fn sticker_label_center(&self) -> (f32, f32) {
        let (cx, cy) = self.sticker_center;
        (cx, cy + self.sticker_label_offset)
    }

    /// Button rectangle, horizontally centered just above the banner edge.
    pub fn cta_rect(&self, width: u32, height: u32, thickness: f32) -> LayoutRect {
        let (cta_w, cta_h) = self.cta_size;
        LayoutRect::new(
            width as f32 / 2.0 - cta_w / 2.0,
            height as f32 - thickness - self.cta_gap,
            cta_w,
            cta_h,
        )
    }

    pub fn cta_label_center(&self, width: u32, height: u32, thickness: f32) -> (f32, f32) {
        (
            width as f32 / 2.0,
            height as f32 - thickness - self.cta_label_gap,
        )
    }

    pub fn watermark_font_px(&self, width: u32) -> f32 {
        width as f32 * self.watermark_font_ratio
    }
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: LayoutConstants = LayoutConstants::DEFAULT;

    #[test]
    fn test_banner_rects() {
        assert_eq!(L.banner_rect(BannerLayout::None, 800, 800, 80.0), None);
        assert_eq!(
            L.banner_rect(BannerLayout::Bottom, 800, 800, 80.0),
            Some(LayoutRect::new(0.0, 720.0, 800.0, 80.0))
        );
        assert_eq!(
            L.banner_rect(BannerLayout::Top, 800, 1000, 100.0),
            Some(LayoutRect::new(0.0, 0.0, 800.0, 100.0))
        );
        assert_eq!(
            L.banner_rect(BannerLayout::Side, 720, 1280, 128.0),
            Some(LayoutRect::new(592.0, 0.0, 128.0, 1280.0))
        );
    }

    #[test]
    fn test_text_row_is_centered_in_band() {
        assert_eq!(L.banner_text_center_y(BannerLayout::Bottom, 800, 80.0), 760.0);
        assert_eq!(L.banner_text_center_y(BannerLayout::Top, 800, 80.0), 40.0);
        assert_eq!(L.banner_text_center_y(BannerLayout::Side, 800, 80.0), 760.0);
    }

    #[test]
    fn test_text_columns() {
        let [brand, tagline, contact] = L.text_column_x(800);
        assert!((brand - 20.0).abs() < 1e-4);
        assert!((tagline - 266.666_66).abs() < 1e-3);
        assert!((contact - 520.0).abs() < 1e-4);
        assert!((L.banner_font_px(80.0) - 32.0).abs() < 1e-4);
    }

    #[test]
    fn test_logo_anchored_bottom_right() {
        let rect = L.logo_rect(800, 800, 80.0);
        assert_eq!(rect, LayoutRect::new(726.0, 731.0, 64.0, 64.0));
        assert_eq!(rect.right(), 790.0);
        assert_eq!(rect.bottom(), 795.0);
    }

    #[test]
    fn test_cta_sits_above_banner() {
        let rect = L.cta_rect(800, 800, 80.0);
        assert_eq!(rect, LayoutRect::new(280.0, 660.0, 240.0, 50.0));
        assert_eq!(L.cta_label_center(800, 800, 80.0), (400.0, 685.0));
    }

    #[test]
    fn test_sticker_and_watermark() {
        assert_eq!(L.sticker_label_center(), (100.0, 110.0));
        assert_eq!(L.watermark_font_px(800), 40.0);
        assert_eq!(L.watermark_text, "© My Brand");
    }

    #[test]
    fn test_rect_edges() {
        let r = LayoutRect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!((r.right(), r.bottom()), (15.0, 15.0));
        assert!(!r.is_empty());
        assert!(LayoutRect::new(0.0, 0.0, 0.0, 3.0).is_empty());
    }
}
