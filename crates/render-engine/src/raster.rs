//! Pixel surfaces: decoded input images and the output canvas.

use image::{Rgba, RgbaImage};

use bannerkit_style_model::CanvasAspect;

/// A decoded input image. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// A single-color image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// The mutable output surface.
///
/// Always sized to one of the [`CanvasAspect`] presets.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    aspect: CanvasAspect,
    pixels: RgbaImage,
}

impl Canvas {
    /// A transparent canvas for `aspect`.
    pub fn new(aspect: CanvasAspect) -> Self {
        let (width, height) = aspect.dimensions();
        Self {
            aspect,
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn aspect(&self) -> CanvasAspect {
        self.aspect
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Switch to another preset. Reallocates only when the size changes.
    pub fn resize(&mut self, aspect: CanvasAspect) {
        if aspect != self.aspect {
            *self = Self::new(aspect);
        }
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }
}
