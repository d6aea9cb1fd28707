//! Style parameters and preset files.
//!
//! A [`StyleParameters`] record is everything the compositor needs besides
//! the images themselves. Presets are the same record stored as JSON.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::transform::ImageTransform;

/// Shown when the brand field is empty.
pub const DEFAULT_BRAND_TEXT: &str = "Brand Name";
/// Shown when the tagline field is empty.
pub const DEFAULT_TAGLINE_TEXT: &str = "Tagline";
/// Shown when the contact field is empty.
pub const DEFAULT_CONTACT_TEXT: &str = "Enquiry: 1234567890";

/// Everything that controls a composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParameters {
    /// Zoom, rotation, and flip of the base image.
    pub transform: ImageTransform,

    /// Output canvas preset.
    pub canvas_aspect: CanvasAspect,

    /// Where the banner strip sits.
    pub banner_layout: BannerLayout,

    /// Banner fill color.
    pub banner_color: Color,

    /// Banner thickness as a percentage of canvas height, `[0, 100]`.
    pub banner_height_percent: f32,

    pub brand_text: String,
    pub tagline_text: String,
    pub contact_text: String,

    /// Draw the low-opacity attribution text across the center.
    pub watermark_enabled: bool,

    pub sticker: StickerKind,
    pub cta: CtaKind,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            transform: ImageTransform::IDENTITY,
            canvas_aspect: CanvasAspect::Square,
            banner_layout: BannerLayout::Bottom,
            banner_color: Color::BLACK,
            banner_height_percent: 10.0,
            brand_text: String::new(),
            tagline_text: String::new(),
            contact_text: String::new(),
            watermark_enabled: false,
            sticker: StickerKind::None,
            cta: CtaKind::None,
        }
    }
}

impl StyleParameters {
    /// Canvas size in pixels for the selected aspect preset.
    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_aspect.dimensions()
    }

    /// Banner thickness in pixels for the selected aspect preset.
    pub fn banner_thickness(&self) -> f32 {
        banner_thickness(self.canvas_size().1, self.banner_height_percent)
    }

    pub fn brand_or_default(&self) -> &str {
        or_default(&self.brand_text, DEFAULT_BRAND_TEXT)
    }

    pub fn tagline_or_default(&self) -> &str {
        or_default(&self.tagline_text, DEFAULT_TAGLINE_TEXT)
    }

    pub fn contact_or_default(&self) -> &str {
        or_default(&self.contact_text, DEFAULT_CONTACT_TEXT)
    }

    /// The three banner fields, left to right, with defaults applied.
    pub fn banner_texts(&self) -> [&str; 3] {
        [
            self.brand_or_default(),
            self.tagline_or_default(),
            self.contact_or_default(),
        ]
    }

    /// Check ranges for values coming from presets or the command line.
    ///
    /// The compositor itself never clamps; this is for input boundaries.
    pub fn validate(&self) -> Result<(), ParamError> {
        let zoom = self.transform.zoom;
        if !zoom.is_finite() || zoom < 0.0 {
            return Err(ParamError::OutOfRange {
                field: "zoom",
                value: zoom.to_string(),
                expected: "a finite value >= 0",
            });
        }
        let pct = self.banner_height_percent;
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(ParamError::OutOfRange {
                field: "banner_height_percent",
                value: pct.to_string(),
                expected: "0 to 100",
            });
        }
        Ok(())
    }

    /// Load a preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ParamError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let params: Self = serde_json::from_str(&json).map_err(|e| ParamError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Write this record as a pretty-printed preset file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ParamError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ParamError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ParamError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ParamError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// `canvas_height * percent / 100`.
pub fn banner_thickness(canvas_height: u32, percent: f32) -> f32 {
    canvas_height as f32 * percent / 100.0
}

fn or_default<'a>(value: &'a str, fallback: &'static str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Output canvas preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CanvasAspect {
    /// 800x800.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// 800x1000.
    #[serde(rename = "4:5")]
    Portrait,
    /// 720x1280.
    #[serde(rename = "9:16")]
    Story,
}

impl CanvasAspect {
    pub const ALL: [CanvasAspect; 3] = [Self::Square, Self::Portrait, Self::Story];

    /// Canvas width and height in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Square => (800, 800),
            Self::Portrait => (800, 1000),
            Self::Story => (720, 1280),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "4:5",
            Self::Story => "9:16",
        }
    }
}

/// Placement of the banner strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BannerLayout {
    /// No banner and no banner text.
    None,
    Top,
    #[default]
    Bottom,
    /// Vertical strip along the right edge.
    Side,
}

impl BannerLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Side => "side",
        }
    }
}

/// Circular promotional badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StickerKind {
    #[default]
    None,
    Sale,
    Discount,
    New,
}

impl StickerKind {
    /// Badge text, or `None` when no sticker is drawn.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Sale => Some("SALE"),
            Self::Discount => Some("50% OFF"),
            Self::New => Some("NEW"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sale => "sale",
            Self::Discount => "discount",
            Self::New => "new",
        }
    }
}

/// Call-to-action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CtaKind {
    #[default]
    None,
    Shop,
    Dm,
    Swipe,
}

impl CtaKind {
    /// Button text, or `None` when no button is drawn.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Shop => Some("SHOP NOW"),
            Self::Dm => Some("DM TO BUY"),
            Self::Swipe => Some("SWIPE UP"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Shop => "shop",
            Self::Dm => "dm",
            Self::Swipe => "swipe",
        }
    }
}

macro_rules! string_enum {
    ($ty:ty, $field:literal, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ParamError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| ParamError::UnknownValue {
                        field: $field,
                        value: s.to_string(),
                        expected: [$($variant.as_str()),+].join(", "),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    CanvasAspect,
    "canvas_aspect",
    [CanvasAspect::Square, CanvasAspect::Portrait, CanvasAspect::Story]
);
string_enum!(
    BannerLayout,
    "banner_layout",
    [
        BannerLayout::None,
        BannerLayout::Top,
        BannerLayout::Bottom,
        BannerLayout::Side
    ]
);
string_enum!(
    StickerKind,
    "sticker",
    [
        StickerKind::None,
        StickerKind::Sale,
        StickerKind::Discount,
        StickerKind::New
    ]
);
string_enum!(
    CtaKind,
    "cta",
    [CtaKind::None, CtaKind::Shop, CtaKind::Dm, CtaKind::Swipe]
);

/// Errors from parsing parameter values or preset files.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("Unknown {field} '{value}' (expected one of: {expected})")]
    UnknownValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Invalid color '{value}' (expected #rgb, #rrggbb, #rrggbbaa or a color name)")]
    InvalidColor { value: String },

    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
