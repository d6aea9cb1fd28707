//! Export configuration and encoding.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use bannerkit_common::config::ExportDefaults;
use bannerkit_common::error::{BannerError, BannerResult};

use crate::raster::Canvas;

/// Prefix of timestamped export names.
pub const EXPORT_FILE_PREFIX: &str = "banner";

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
    Webp,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Png, Self::Jpeg, Self::Webp];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
        }
    }

    /// Whether the encoded file keeps the canvas alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

impl FromStr for ExportFormat {
    type Err = BannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::Webp),
            other => Err(BannerError::invalid_parameter(format!(
                "Unknown format: {other}. Use: png, jpeg, webp"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the exported file is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportNaming {
    /// `banner_<ISO-8601 timestamp>.<ext>`, with `:` and `.` replaced by `-`.
    Timestamped,
    /// A fixed file stem; the extension is appended unless already present.
    Fixed(String),
}

impl ExportNaming {
    pub fn file_name(&self, format: ExportFormat, now: DateTime<Utc>) -> String {
        match self {
            Self::Timestamped => timestamped_file_name(format, now),
            Self::Fixed(name) => {
                let has_extension = Path::new(name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));
                if has_extension {
                    name.clone()
                } else {
                    format!("{name}.{}", format.extension())
                }
            }
        }
    }
}

/// `banner_2026-10-18T09-30-00-123Z.png` style name for `now`.
pub fn timestamped_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{EXPORT_FILE_PREFIX}_{stamp}.{}", format.extension())
}

/// A single export: where, how named, and in which format.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub naming: ExportNaming,
    /// Only used for JPEG, `[1, 100]`.
    pub jpeg_quality: u8,
}

impl ExportRequest {
    /// Build a request from configured defaults.
    pub fn from_defaults(defaults: &ExportDefaults) -> BannerResult<Self> {
        let naming = if defaults.timestamped_names {
            ExportNaming::Timestamped
        } else {
            ExportNaming::Fixed(defaults.fixed_name.clone())
        };
        Ok(Self {
            output_dir: defaults.output_dir.clone(),
            format: defaults.format.parse()?,
            naming,
            jpeg_quality: defaults.jpeg_quality,
        })
    }
}

/// Encode the canvas into `format`.
///
/// JPEG has no alpha channel; transparent regions come out black.
pub fn encode_canvas(
    canvas: &Canvas,
    format: ExportFormat,
    jpeg_quality: u8,
) -> BannerResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let result = match format {
        ExportFormat::Png => canvas.pixels().write_to(&mut buf, ImageFormat::Png),
        ExportFormat::Webp => canvas.pixels().write_to(&mut buf, ImageFormat::WebP),
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(canvas.pixels().clone()).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)
        }
    };
    result.map_err(|e| BannerError::encode(format!("{format}: {e}")))?;
    Ok(buf.into_inner())
}

/// Encode the canvas and write it under `request.output_dir`.
///
/// Returns the written file path.
pub fn export_canvas(canvas: &Canvas, request: &ExportRequest) -> BannerResult<PathBuf> {
    let file_name = request.naming.file_name(request.format, Utc::now());
    let output_path = request.output_dir.join(file_name);

    tracing::info!(
        output = %output_path.display(),
        format = %request.format,
        width = canvas.width(),
        height = canvas.height(),
        "Starting export"
    );

    std::fs::create_dir_all(&request.output_dir)?;
    let bytes = encode_canvas(canvas, request.format, request.jpeg_quality)?;
    std::fs::write(&output_path, &bytes)?;

    tracing::info!(bytes = bytes.len(), "Export complete");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bannerkit_style_model::CanvasAspect;
    use chrono::TimeZone;
    use image::Rgba;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 5).unwrap()
    }

    fn painted_canvas() -> Canvas {
        let mut canvas = Canvas::new(CanvasAspect::Square);
        canvas.pixels_mut().put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        canvas
    }

    #[test]
    fn test_timestamped_name() {
        assert_eq!(
            timestamped_file_name(ExportFormat::Png, fixed_time()),
            "banner_2026-10-18T09-30-05-000Z.png"
        );
    }

    #[test]
    fn test_fixed_name_appends_extension_once() {
        let naming = ExportNaming::Fixed("banner".to_string());
        assert_eq!(naming.file_name(ExportFormat::Jpeg, fixed_time()), "banner.jpeg");

        let naming = ExportNaming::Fixed("promo.webp".to_string());
        assert_eq!(naming.file_name(ExportFormat::Webp, fixed_time()), "promo.webp");
        assert_eq!(
            naming.file_name(ExportFormat::Png, fixed_time()),
            "promo.webp.png"
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("jpg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!("webp".parse::<ExportFormat>().unwrap(), ExportFormat::Webp);
        assert!(matches!(
            "tiff".parse::<ExportFormat>(),
            Err(BannerError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_encoded_bytes_decode_with_expected_format() {
        let canvas = painted_canvas();
        for format in ExportFormat::ALL {
            let bytes = encode_canvas(&canvas, format, 90).unwrap();
            let guessed = image::guess_format(&bytes).unwrap();
            let expected = match format {
                ExportFormat::Png => ImageFormat::Png,
                ExportFormat::Jpeg => ImageFormat::Jpeg,
                ExportFormat::Webp => ImageFormat::WebP,
            };
            assert_eq!(guessed, expected);

            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (800, 800));
        }
    }

    #[test]
    fn test_png_keeps_pixels_exactly() {
        let canvas = painted_canvas();
        let bytes = encode_canvas(&canvas, ExportFormat::Png, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(&decoded, canvas.pixels());
    }

    #[test]
    fn test_request_from_defaults() {
        let defaults = ExportDefaults {
            format: "jpg".to_string(),
            timestamped_names: false,
            fixed_name: "promo".to_string(),
            ..Default::default()
        };
        let request = ExportRequest::from_defaults(&defaults).unwrap();
        assert_eq!(request.format, ExportFormat::Jpeg);
        assert_eq!(request.naming, ExportNaming::Fixed("promo".to_string()));

        let bad = ExportDefaults {
            format: "bmp".to_string(),
            ..Default::default()
        };
        assert!(ExportRequest::from_defaults(&bad).is_err());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = std::env::temp_dir().join("bannerkit_test_export");
        let _ = std::fs::remove_dir_all(&dir);

        let request = ExportRequest {
            output_dir: dir.join("out"),
            format: ExportFormat::Png,
            naming: ExportNaming::Fixed("banner".to_string()),
            jpeg_quality: 90,
        };
        let path = export_canvas(&painted_canvas(), &request).unwrap();
        assert_eq!(path, dir.join("out").join("banner.png"));
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
