//! Font loading and glyph rasterisation.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{Pixel, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use bannerkit_common::config::FontConfig;
use bannerkit_common::error::{BannerError, BannerResult};
use bannerkit_style_model::Color;

/// Well-known (regular, bold) font locations, probed in order.
const SYSTEM_FONT_CANDIDATES: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    ),
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
    ("/Library/Fonts/Arial.ttf", "/Library/Fonts/Arial Bold.ttf"),
    ("C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\arialbd.ttf"),
];

/// Regular and (optional) bold faces used by the compositor.
#[derive(Clone)]
pub struct FontSet {
    regular: Font<'static>,
    bold: Option<Font<'static>>,
    source: Option<PathBuf>,
}

impl FontSet {
    /// Parse fonts from memory.
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> BannerResult<Self> {
        let regular = Font::try_from_vec(regular)
            .ok_or_else(|| BannerError::config("regular font data is not a usable font"))?;
        let bold = match bold {
            Some(data) => Some(
                Font::try_from_vec(data)
                    .ok_or_else(|| BannerError::config("bold font data is not a usable font"))?,
            ),
            None => None,
        };
        Ok(Self {
            regular,
            bold,
            source: None,
        })
    }

    /// Load fonts from files. A missing or unparsable file is an error.
    pub fn from_paths(regular: &Path, bold: Option<&Path>) -> BannerResult<Self> {
        let mut set = Self {
            regular: load_font_file(regular)?,
            bold: None,
            source: Some(regular.to_path_buf()),
        };
        if let Some(bold) = bold {
            set.bold = Some(load_font_file(bold)?);
        }
        Ok(set)
    }

    /// Probe well-known system locations.
    pub fn discover() -> Option<Self> {
        SYSTEM_FONT_CANDIDATES
            .iter()
            .find_map(|(regular, bold)| {
                let regular = Path::new(regular);
                if !regular.exists() {
                    return None;
                }
                let bold = Path::new(bold);
                let bold = bold.exists().then_some(bold);
                Self::from_paths(regular, bold)
                    .map_err(|e| tracing::debug!("Skipping font candidate: {e}"))
                    .ok()
            })
    }

    /// Resolve fonts from configuration, probing the system when no regular
    /// face is configured. `Ok(None)` means no font could be found.
    pub fn from_config(config: &FontConfig) -> BannerResult<Option<Self>> {
        let mut set = match &config.regular {
            Some(path) => Self::from_paths(path, None)?,
            None => match Self::discover() {
                Some(set) => set,
                None => return Ok(None),
            },
        };
        if let Some(bold) = &config.bold {
            set.bold = Some(load_font_file(bold)?);
        }
        tracing::debug!(source = ?set.source, bold = set.bold.is_some(), "Fonts resolved");
        Ok(Some(set))
    }

    pub fn regular(&self) -> &Font<'static> {
        &self.regular
    }

    /// The bold face, or the regular one when no bold face is loaded.
    pub fn bold(&self) -> &Font<'static> {
        self.bold.as_ref().unwrap_or(&self.regular)
    }

    pub fn has_bold(&self) -> bool {
        self.bold.is_some()
    }

    /// File the regular face was read from, when known.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("source", &self.source)
            .field("has_bold", &self.bold.is_some())
            .finish()
    }
}

fn load_font_file(path: &Path) -> BannerResult<Font<'static>> {
    let data = std::fs::read(path).map_err(|_| BannerError::FontUnavailable {
        path: path.to_path_buf(),
    })?;
    Font::try_from_vec(data).ok_or_else(|| BannerError::FontUnavailable {
        path: path.to_path_buf(),
    })
}

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor is the left edge.
    Left,
    /// Anchor is the horizontal center.
    Center,
}

/// How a text run is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub px: f32,
    pub color: Color,
    /// Multiplied into the color's alpha for this run only.
    pub opacity: f32,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(px: f32, color: Color, align: TextAlign) -> Self {
        Self {
            px,
            color,
            opacity: 1.0,
            align,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Advance width of `text` at `px` pixels.
pub fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    font.layout(text, Scale::uniform(px), point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Paint `text` onto `canvas`, vertically centered on `anchor.1`.
///
/// Glyph coverage is alpha-blended over the existing pixels; anything
/// outside the canvas is clipped.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    style: &TextStyle,
    anchor: (f32, f32),
    text: &str,
) {
    if text.is_empty() || !style.px.is_finite() || style.px <= 0.0 {
        return;
    }

    let scale = Scale::uniform(style.px);
    let v_metrics = font.v_metrics(scale);
    let baseline = anchor.1 + (v_metrics.ascent + v_metrics.descent) / 2.0;
    let start_x = match style.align {
        TextAlign::Left => anchor.0,
        TextAlign::Center => anchor.0 - text_width(font, style.px, text) / 2.0,
    };

    let [r, g, b, a] = style.color.with_opacity(style.opacity).to_array();
    let run_alpha = a as f32 / 255.0;
    let (width, height) = canvas.dimensions();

    for glyph in font.layout(text, scale, point(start_x, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                return;
            }
            let alpha = (coverage * run_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
            if alpha == 0 {
                return;
            }
            canvas
                .get_pixel_mut(px as u32, py as u32)
                .blend(&Rgba([r, g, b, alpha]));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_font_bytes_rejected() {
        let err = FontSet::from_bytes(vec![0, 1, 2, 3], None).unwrap_err();
        assert!(matches!(err, BannerError::Config { .. }));
    }

    #[test]
    fn test_missing_font_file_is_unavailable() {
        let path = Path::new("/nonexistent/bannerkit/Font.ttf");
        let err = FontSet::from_paths(path, None).unwrap_err();
        assert!(matches!(err, BannerError::FontUnavailable { .. }));
    }

    #[test]
    fn test_configured_missing_font_is_error() {
        let config = FontConfig {
            regular: Some(PathBuf::from("/nonexistent/bannerkit/Font.ttf")),
            bold: None,
        };
        assert!(FontSet::from_config(&config).is_err());
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let Some(fonts) = FontSet::discover() else {
            return;
        };
        let mut canvas = RgbaImage::new(200, 60);
        let style = TextStyle::new(32.0, Color::WHITE, TextAlign::Left);
        draw_text(&mut canvas, fonts.regular(), &style, (10.0, 30.0), "Acme");

        let painted = canvas.pixels().filter(|p| p.0[3] > 0).count();
        assert!(painted > 0);
        // Nothing left of the anchor beyond glyph side bearing.
        assert!((0..5).all(|x| (0..60).all(|y| canvas.get_pixel(x, y).0[3] == 0)));
    }

    #[test]
    fn test_centered_text_straddles_anchor() {
        let Some(fonts) = FontSet::discover() else {
            return;
        };
        let mut canvas = RgbaImage::new(300, 60);
        let style = TextStyle::new(28.0, Color::WHITE, TextAlign::Center);
        draw_text(&mut canvas, fonts.bold(), &style, (150.0, 30.0), "50% OFF");

        let left = canvas
            .enumerate_pixels()
            .filter(|(x, _, p)| *x < 150 && p.0[3] > 0)
            .count();
        let right = canvas
            .enumerate_pixels()
            .filter(|(x, _, p)| *x >= 150 && p.0[3] > 0)
            .count();
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn test_opacity_scales_alpha() {
        let Some(fonts) = FontSet::discover() else {
            return;
        };
        let mut canvas = RgbaImage::new(200, 60);
        let style = TextStyle::new(40.0, Color::BLACK, TextAlign::Left).with_opacity(0.3);
        draw_text(&mut canvas, fonts.regular(), &style, (5.0, 30.0), "MMMM");

        let max_alpha = canvas.pixels().map(|p| p.0[3]).max().unwrap_or(0);
        assert!(max_alpha > 0);
        assert!(max_alpha <= 77);
    }

    #[test]
    fn test_text_width_grows_with_text() {
        let Some(fonts) = FontSet::discover() else {
            return;
        };
        let short = text_width(fonts.regular(), 20.0, "NEW");
        let long = text_width(fonts.regular(), 20.0, "SHOP NOW");
        assert!(long > short);
        assert_eq!(text_width(fonts.regular(), 20.0, ""), 0.0);
    }
}
