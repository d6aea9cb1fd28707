//! Editing session: the state a user interface threads through its events.
//!
//! A session owns the loaded images, the current [`StyleParameters`], and
//! the canvas. Every mutation runs to completion and repaints the canvas
//! exactly once. Failed loads leave the previous state untouched.

use std::path::{Path, PathBuf};

use bannerkit_common::error::{BannerError, BannerResult};
use bannerkit_style_model::{CanvasAspect, StyleParameters};

use crate::acquire::{decode_image, load_image};
use crate::compositor::Compositor;
use crate::export::{export_canvas, ExportRequest};
use crate::raster::{Canvas, RasterImage};

#[derive(Debug)]
pub struct EditorSession {
    compositor: Compositor,
    base: Option<RasterImage>,
    logo: Option<RasterImage>,
    params: StyleParameters,
    canvas: Canvas,
    redraws: u64,
}

impl EditorSession {
    pub fn new(compositor: Compositor) -> Self {
        Self::with_params(compositor, StyleParameters::default())
    }

    pub fn with_params(compositor: Compositor, params: StyleParameters) -> Self {
        let canvas = Canvas::new(params.canvas_aspect);
        Self {
            compositor,
            base: None,
            logo: None,
            params,
            canvas,
            redraws: 0,
        }
    }

    pub fn params(&self) -> &StyleParameters {
        &self.params
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn base(&self) -> Option<&RasterImage> {
        self.base.as_ref()
    }

    pub fn logo(&self) -> Option<&RasterImage> {
        self.logo.as_ref()
    }

    /// Number of repaints that actually drew something.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// True once a base image has been loaded.
    pub fn can_export(&self) -> bool {
        self.base.is_some()
    }

    /// Load the base image from a file.
    ///
    /// On success the canvas returns to the square preset and is redrawn.
    pub fn load_image_path(&mut self, path: impl AsRef<Path>) -> BannerResult<()> {
        let image = load_image(path)?;
        self.replace_base(image);
        Ok(())
    }

    /// Load the base image from encoded bytes.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> BannerResult<()> {
        let image = decode_image(bytes)?;
        self.replace_base(image);
        Ok(())
    }

    /// Load the logo from a file and redraw.
    pub fn load_logo_path(&mut self, path: impl AsRef<Path>) -> BannerResult<()> {
        let logo = load_image(path)?;
        self.logo = Some(logo);
        self.redraw();
        Ok(())
    }

    /// Load the logo from encoded bytes and redraw.
    pub fn load_logo_bytes(&mut self, bytes: &[u8]) -> BannerResult<()> {
        let logo = decode_image(bytes)?;
        self.logo = Some(logo);
        self.redraw();
        Ok(())
    }

    /// Replace every parameter at once.
    pub fn set_params(&mut self, params: StyleParameters) {
        self.params = params;
        self.redraw();
    }

    /// Edit parameters in place, then redraw once.
    pub fn update(&mut self, edit: impl FnOnce(&mut StyleParameters)) {
        edit(&mut self.params);
        self.redraw();
    }

    pub fn set_aspect(&mut self, aspect: CanvasAspect) {
        self.update(|p| p.canvas_aspect = aspect);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.update(|p| p.transform.zoom = zoom);
    }

    /// Rotate a further 90 degrees clockwise.
    pub fn rotate(&mut self) {
        self.update(|p| p.transform.rotate());
    }

    /// Toggle the horizontal mirror.
    pub fn flip(&mut self) {
        self.update(|p| p.transform.flip());
    }

    /// Zoom 1, no rotation, not flipped.
    pub fn reset_transform(&mut self) {
        self.update(|p| p.transform.reset());
    }

    /// Encode the current canvas and write it out.
    pub fn export(&self, request: &ExportRequest) -> BannerResult<PathBuf> {
        if !self.can_export() {
            return Err(BannerError::NothingToExport);
        }
        export_canvas(&self.canvas, request)
    }

    fn replace_base(&mut self, image: RasterImage) {
        self.base = Some(image);
        self.params.canvas_aspect = CanvasAspect::Square;
        self.redraw();
    }

    fn redraw(&mut self) {
        let drawn = self.compositor.render_into(
            &mut self.canvas,
            self.base.as_ref(),
            self.logo.as_ref(),
            &self.params,
        );
        if drawn {
            self.redraws += 1;
        }
    }
}
