//! Image acquisition: read and decode user-supplied files.

use std::path::Path;

use bannerkit_common::error::{BannerError, BannerResult};

use crate::raster::RasterImage;

/// Read and decode an image file.
///
/// A failed read is reported as [`BannerError::Read`], undecodable content
/// as [`BannerError::Decode`].
pub fn load_image(path: impl AsRef<Path>) -> BannerResult<RasterImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| BannerError::read(path, e))?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| BannerError::decode(format!("{}: {e}", path.display())))?;
    let image = RasterImage::new(decoded.to_rgba8());
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}

/// Decode an in-memory image in any format the decoder recognizes.
pub fn decode_image(bytes: &[u8]) -> BannerResult<RasterImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| BannerError::decode(e.to_string()))?;
    Ok(RasterImage::new(decoded.to_rgba8()))
}
