//! Banner compositor: base image, banner, logo, sticker, CTA, watermark.
//!
//! Draw order is fixed and later layers cover earlier ones:
//!
//! 1. clear
//! 2. base image (zoom, flip, rotation about the canvas center)
//! 3. banner strip and its three text fields
//! 4. logo
//! 5. sticker badge
//! 6. call-to-action button
//! 7. watermark
//!
//! Rendering is a pure function of the images, the parameters, the fonts,
//! and the layout table.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, Blend};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use imageproc::rect::Rect;

use bannerkit_style_model::{
    banner_thickness, Color, ImageTransform, LayoutConstants, LayoutRect, StyleParameters,
};

use crate::raster::{Canvas, RasterImage};
use crate::text::{draw_text, FontSet, TextAlign, TextStyle};

/// Renders [`StyleParameters`] onto a [`Canvas`].
#[derive(Debug, Clone)]
pub struct Compositor {
    fonts: Option<FontSet>,
    layout: LayoutConstants,
}

impl Compositor {
    /// A compositor using the default layout table.
    ///
    /// Without fonts every text overlay is skipped.
    pub fn new(fonts: Option<FontSet>) -> Self {
        Self {
            fonts,
            layout: LayoutConstants::DEFAULT,
        }
    }

    pub fn fonts(&self) -> Option<&FontSet> {
        self.fonts.as_ref()
    }

    /// Render onto a fresh canvas. Returns `None` when there is no base image.
    pub fn render(
        &self,
        base: Option<&RasterImage>,
        logo: Option<&RasterImage>,
        params: &StyleParameters,
    ) -> Option<Canvas> {
        let base = base?;
        let mut canvas = Canvas::new(params.canvas_aspect);
        self.compose(&mut canvas, base, logo, params);
        Some(canvas)
    }

    /// Repaint `canvas` in place.
    ///
    /// Without a base image this is a no-op and the canvas keeps its
    /// previous contents. Returns whether anything was drawn.
    pub fn render_into(
        &self,
        canvas: &mut Canvas,
        base: Option<&RasterImage>,
        logo: Option<&RasterImage>,
        params: &StyleParameters,
    ) -> bool {
        let Some(base) = base else {
            tracing::debug!("No base image loaded, skipping render");
            return false;
        };
        self.compose(canvas, base, logo, params);
        true
    }

    fn compose(
        &self,
        canvas: &mut Canvas,
        base: &RasterImage,
        logo: Option<&RasterImage>,
        params: &StyleParameters,
    ) {
        canvas.resize(params.canvas_aspect);
        canvas.clear();

        let (width, height) = (canvas.width(), canvas.height());
        let thickness = banner_thickness(height, params.banner_height_percent);
        let banner = self
            .layout
            .banner_rect(params.banner_layout, width, height, thickness);

        tracing::debug!(
            width,
            height,
            thickness,
            layout = %params.banner_layout,
            sticker = %params.sticker,
            cta = %params.cta,
            watermark = params.watermark_enabled,
            "Composing banner"
        );

        let wants_text = banner.is_some()
            || params.sticker.label().is_some()
            || params.cta.label().is_some()
            || params.watermark_enabled;
        if wants_text && self.fonts.is_none() {
            tracing::warn!("No font available, text overlays will be skipped");
        }

        let pixels = canvas.pixels_mut();

        draw_base(pixels, base, &params.transform);

        if let Some(band) = banner {
            fill_rect(pixels, band, params.banner_color);
            self.draw_banner_text(pixels, params, thickness);
        }

        if let Some(logo) = logo {
            self.draw_logo(pixels, logo, thickness);
        }

        if let Some(label) = params.sticker.label() {
            self.draw_sticker(pixels, label);
        }

        if let Some(label) = params.cta.label() {
            self.draw_cta(pixels, label, thickness);
        }

        if params.watermark_enabled {
            self.draw_watermark(pixels);
        }
    }

    fn draw_banner_text(&self, pixels: &mut RgbaImage, params: &StyleParameters, thickness: f32) {
        let Some(fonts) = &self.fonts else {
            return;
        };
        let (width, height) = pixels.dimensions();
        let layout = &self.layout;
        let style = TextStyle::new(
            layout.banner_font_px(thickness),
            layout.banner_text_color,
            TextAlign::Left,
        );
        let y = layout.banner_text_center_y(params.banner_layout, height, thickness);

        for (x, text) in layout
            .text_column_x(width)
            .into_iter()
            .zip(params.banner_texts())
        {
            draw_text(pixels, fonts.regular(), &style, (x, y), text);
        }
    }

    fn draw_logo(&self, pixels: &mut RgbaImage, logo: &RasterImage, thickness: f32) {
        let (width, height) = pixels.dimensions();
        let slot = self.layout.logo_rect(width, height, thickness);
        let size = slot.width.round();
        if !size.is_finite() || size < 1.0 {
            return;
        }
        let size = size as u32;
        let scaled = imageops::resize(logo.pixels(), size, size, FilterType::Triangle);
        imageops::overlay(
            pixels,
            &scaled,
            slot.x.round() as i64,
            slot.y.round() as i64,
        );
    }

    fn draw_sticker(&self, pixels: &mut RgbaImage, label: &str) {
        let layout = &self.layout;
        let (cx, cy) = layout.sticker_center;
        draw_filled_circle_mut(
            pixels,
            (cx.round() as i32, cy.round() as i32),
            layout.sticker_radius.round() as i32,
            to_rgba(layout.sticker_fill),
        );

        if let Some(fonts) = &self.fonts {
            let style = TextStyle::new(
                layout.sticker_font_px,
                layout.sticker_text_color,
                TextAlign::Center,
            );
            draw_text(
                pixels,
                fonts.bold(),
                &style,
                layout.sticker_label_center(),
                label,
            );
        }
    }

    fn draw_cta(&self, pixels: &mut RgbaImage, label: &str, thickness: f32) {
        let (width, height) = pixels.dimensions();
        let layout = &self.layout;
        fill_rect(
            pixels,
            layout.cta_rect(width, height, thickness),
            layout.cta_fill,
        );

        if let Some(fonts) = &self.fonts {
            let style = TextStyle::new(layout.cta_font_px, layout.cta_text_color, TextAlign::Center);
            draw_text(
                pixels,
                fonts.bold(),
                &style,
                layout.cta_label_center(width, height, thickness),
                label,
            );
        }
    }

    fn draw_watermark(&self, pixels: &mut RgbaImage) {
        let Some(fonts) = &self.fonts else {
            return;
        };
        let (width, height) = pixels.dimensions();
        let layout = &self.layout;
        let style = TextStyle::new(
            layout.watermark_font_px(width),
            layout.watermark_color,
            TextAlign::Center,
        )
        .with_opacity(layout.watermark_opacity);
        draw_text(
            pixels,
            fonts.regular(),
            &style,
            (width as f32 / 2.0, height as f32 / 2.0),
            layout.watermark_text,
        );
    }
}

/// Draw the base image stretched to a centered square of
/// `min(width, height) * zoom`, flipped and rotated about the canvas center.
///
/// When the square fits the canvas the image is resampled to it first, so
/// the warp only moves whole pixels for quarter turns and flips. Larger
/// squares are scaled inside the warp; the work then stays bounded by the
/// canvas size.
fn draw_base(pixels: &mut RgbaImage, base: &RasterImage, transform: &ImageTransform) {
    let (width, height) = pixels.dimensions();
    let draw_size = (width.min(height) as f32 * transform.zoom).round();
    if !draw_size.is_finite() || draw_size < 1.0 || base.width() == 0 || base.height() == 0 {
        tracing::debug!(zoom = transform.zoom, "Degenerate draw size, base image skipped");
        return;
    }

    let (source, scale) = if draw_size > width.max(height) as f32 {
        let scale = (
            draw_size / base.width() as f32,
            draw_size / base.height() as f32,
        );
        (Cow::Borrowed(base.pixels()), scale)
    } else if base.width() == draw_size as u32 && base.height() == draw_size as u32 {
        (Cow::Borrowed(base.pixels()), (1.0, 1.0))
    } else {
        let size = draw_size as u32;
        let scaled = imageops::resize(base.pixels(), size, size, FilterType::Triangle);
        (Cow::Owned(scaled), (1.0, 1.0))
    };

    warp_into(
        &*source,
        &base_projection(width, height, source.dimensions(), scale, transform),
        Interpolation::Nearest,
        Rgba([0, 0, 0, 0]),
        pixels,
    );
}

/// Maps pixel indices of `source` onto the canvas, scaling by `scale`
/// about the image center.
///
/// Works on pixel centers so a mirrored or quarter-turned square lands
/// exactly on the canvas grid.
fn base_projection(
    canvas_width: u32,
    canvas_height: u32,
    source: (u32, u32),
    scale: (f32, f32),
    transform: &ImageTransform,
) -> Projection {
    let mirror = if transform.flipped { -1.0 } else { 1.0 };

    Projection::translate(
        0.5 - source.0 as f32 / 2.0,
        0.5 - source.1 as f32 / 2.0,
    )
    .and_then(Projection::scale(scale.0, scale.1))
    .and_then(rotation(transform.rotation_degrees))
    .and_then(Projection::scale(mirror, 1.0))
    .and_then(Projection::translate(
        canvas_width as f32 / 2.0 - 0.5,
        canvas_height as f32 / 2.0 - 0.5,
    ))
}

/// Clockwise rotation. Quarter turns use exact matrices so that a full
/// turn reproduces the unrotated pixels.
fn rotation(degrees: i32) -> Projection {
    let matrix = match degrees.rem_euclid(360) {
        0 => return Projection::translate(0.0, 0.0),
        90 => [0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        180 => [-1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0],
        270 => [0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        other => return Projection::rotate((other as f32).to_radians()),
    };
    Projection::from_matrix(matrix)
        .unwrap_or_else(|| Projection::rotate((degrees.rem_euclid(360) as f32).to_radians()))
}

/// Fill a layout rectangle, blending when the color is translucent.
fn fill_rect(pixels: &mut RgbaImage, rect: LayoutRect, color: Color) {
    let Some(rect) = to_pixel_rect(rect) else {
        return;
    };
    if color.is_opaque() {
        draw_filled_rect_mut(pixels, rect, to_rgba(color));
    } else {
        let mut blend = Blend(std::mem::replace(pixels, RgbaImage::new(0, 0)));
        draw_filled_rect_mut(&mut blend, rect, to_rgba(color));
        *pixels = blend.0;
    }
}

fn to_pixel_rect(rect: LayoutRect) -> Option<Rect> {
    if rect.is_empty() || !rect.x.is_finite() || !rect.y.is_finite() {
        return None;
    }
    let x0 = rect.x.round() as i32;
    let y0 = rect.y.round() as i32;
    let x1 = rect.right().round() as i32;
    let y1 = rect.bottom().round() as i32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32))
}

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba(color.to_array())
}
