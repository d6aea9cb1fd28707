//! Compose a banner over an image and export it.

use std::path::PathBuf;

use clap::Args;

use bannerkit_common::config::AppConfig;
use bannerkit_render_engine::export::{ExportFormat, ExportNaming, ExportRequest};
use bannerkit_render_engine::{Compositor, EditorSession, FontSet};
use bannerkit_style_model::{
    BannerLayout, CanvasAspect, Color, CtaKind, StickerKind, StyleParameters,
};

#[derive(Debug, Default, Args)]
pub struct RenderArgs {
    /// Base image to compose over
    pub image: PathBuf,

    /// Logo drawn in the bottom-right corner
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Preset file applied before the flags below
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Canvas aspect: 1:1, 4:5, 9:16
    #[arg(long)]
    pub aspect: Option<String>,

    /// Banner layout: none, top, bottom, side
    #[arg(long)]
    pub layout: Option<String>,

    /// Banner color (#rgb, #rrggbb, #rrggbbaa or a color name)
    #[arg(long)]
    pub color: Option<String>,

    /// Banner thickness as a percentage of canvas height
    #[arg(long)]
    pub height: Option<f32>,

    /// Brand text
    #[arg(long)]
    pub brand: Option<String>,

    /// Tagline text
    #[arg(long)]
    pub tagline: Option<String>,

    /// Contact text
    #[arg(long)]
    pub contact: Option<String>,

    /// Draw the centered watermark
    #[arg(long)]
    pub watermark: bool,

    /// Sticker: none, sale, discount, new
    #[arg(long)]
    pub sticker: Option<String>,

    /// Call to action: none, shop, dm, swipe
    #[arg(long)]
    pub cta: Option<String>,

    /// Base image zoom factor
    #[arg(long)]
    pub zoom: Option<f32>,

    /// Number of clockwise quarter turns
    #[arg(long, default_value = "0")]
    pub rotate: u32,

    /// Toggle the horizontal mirror
    #[arg(long)]
    pub flip: bool,

    /// Output format: png, jpeg, webp
    #[arg(long)]
    pub format: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fixed output file name instead of a timestamped one
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run(args: RenderArgs, config: &AppConfig) -> anyhow::Result<()> {
    let params = build_params(&args)?;
    let request = build_request(&args, config)?;

    let fonts = FontSet::from_config(&config.fonts)
        .map_err(|e| anyhow::anyhow!("Failed to load fonts: {e}"))?;
    if fonts.is_none() {
        tracing::warn!("No usable font found; text will not be drawn");
    }

    println!("Rendering {}", args.image.display());

    let mut session = EditorSession::new(Compositor::new(fonts));
    if let Some(logo) = &args.logo {
        session
            .load_logo_path(logo)
            .map_err(|e| anyhow::anyhow!("Failed to load logo: {e}"))?;
    }
    session
        .load_image_path(&args.image)
        .map_err(|e| anyhow::anyhow!("Failed to load image: {e}"))?;
    // Loading resets the aspect; apply the requested parameters afterwards.
    session.set_params(params);

    let canvas = session.canvas();
    println!("  Canvas: {}x{}", canvas.width(), canvas.height());
    println!("  Layout: {}", session.params().banner_layout);
    println!("  Format: {}", request.format);

    let path = session
        .export(&request)
        .map_err(|e| anyhow::anyhow!("Failed to export: {e}"))?;
    println!("Exported: {}", path.display());

    Ok(())
}

/// Start from the preset (or defaults) and apply every flag that was given.
pub fn build_params(args: &RenderArgs) -> anyhow::Result<StyleParameters> {
    let mut params = match &args.preset {
        Some(path) => StyleParameters::load(path)?,
        None => StyleParameters::default(),
    };

    if let Some(aspect) = &args.aspect {
        params.canvas_aspect = aspect.parse::<CanvasAspect>()?;
    }
    if let Some(layout) = &args.layout {
        params.banner_layout = layout.parse::<BannerLayout>()?;
    }
    if let Some(color) = &args.color {
        params.banner_color = Color::parse(color)?;
    }
    if let Some(height) = args.height {
        params.banner_height_percent = height;
    }
    if let Some(brand) = &args.brand {
        params.brand_text = brand.clone();
    }
    if let Some(tagline) = &args.tagline {
        params.tagline_text = tagline.clone();
    }
    if let Some(contact) = &args.contact {
        params.contact_text = contact.clone();
    }
    if args.watermark {
        params.watermark_enabled = true;
    }
    if let Some(sticker) = &args.sticker {
        params.sticker = sticker.parse::<StickerKind>()?;
    }
    if let Some(cta) = &args.cta {
        params.cta = cta.parse::<CtaKind>()?;
    }
    if let Some(zoom) = args.zoom {
        params.transform.zoom = zoom;
    }
    for _ in 0..args.rotate {
        params.transform.rotate();
    }
    if args.flip {
        params.transform.flip();
    }

    params.validate()?;
    Ok(params)
}

/// Configured export defaults, overridden by `--format`, `--output` and `--name`.
pub fn build_request(args: &RenderArgs, config: &AppConfig) -> anyhow::Result<ExportRequest> {
    let mut request = ExportRequest::from_defaults(&config.export)
        .map_err(|e| anyhow::anyhow!("Invalid export configuration: {e}"))?;
    if let Some(format) = &args.format {
        request.format = format.parse::<ExportFormat>()?;
    }
    if let Some(output) = &args.output {
        request.output_dir = output.clone();
    }
    if let Some(name) = &args.name {
        request.naming = ExportNaming::Fixed(name.clone());
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn args() -> RenderArgs {
        RenderArgs {
            image: PathBuf::from("photo.png"),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let params = build_params(&RenderArgs {
            aspect: Some("9:16".to_string()),
            layout: Some("side".to_string()),
            color: Some("#ff8800".to_string()),
            height: Some(25.0),
            brand: Some("Acme".to_string()),
            sticker: Some("discount".to_string()),
            cta: Some("swipe".to_string()),
            rotate: 5,
            flip: true,
            watermark: true,
            ..args()
        })
        .unwrap();

        assert_eq!(params.canvas_aspect, CanvasAspect::Story);
        assert_eq!(params.banner_layout, BannerLayout::Side);
        assert_eq!(params.banner_color, Color::rgb(255, 136, 0));
        assert_eq!(params.banner_height_percent, 25.0);
        assert_eq!(params.brand_text, "Acme");
        assert_eq!(params.sticker, StickerKind::Discount);
        assert_eq!(params.cta, CtaKind::Swipe);
        assert_eq!(params.transform.rotation_degrees, 450);
        assert!(params.transform.flipped);
        assert!(params.watermark_enabled);
    }

    #[test]
    fn test_bad_flag_values_are_rejected() {
        let bad_layout = RenderArgs {
            layout: Some("diagonal".to_string()),
            ..args()
        };
        assert!(build_params(&bad_layout).is_err());

        let bad_height = RenderArgs {
            height: Some(140.0),
            ..args()
        };
        assert!(build_params(&bad_height).is_err());

        let bad_format = RenderArgs {
            format: Some("gif".to_string()),
            ..args()
        };
        assert!(build_request(&bad_format, &AppConfig::default()).is_err());
    }

    #[test]
    fn test_flags_apply_on_top_of_preset() {
        let dir = std::env::temp_dir().join("bannerkit_cli_test_preset");
        std::fs::create_dir_all(&dir).unwrap();
        let preset = dir.join("preset.json");
        StyleParameters {
            brand_text: "From preset".to_string(),
            banner_layout: BannerLayout::Top,
            ..Default::default()
        }
        .save(&preset)
        .unwrap();

        let params = build_params(&RenderArgs {
            preset: Some(preset),
            layout: Some("bottom".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(params.brand_text, "From preset");
        assert_eq!(params.banner_layout, BannerLayout::Bottom);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_name_switches_to_fixed_naming() {
        let request = build_request(
            &RenderArgs {
                name: Some("promo".to_string()),
                format: Some("jpg".to_string()),
                ..args()
            },
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(request.naming, ExportNaming::Fixed("promo".to_string()));
        assert_eq!(request.format, ExportFormat::Jpeg);
    }

    #[test]
    fn test_render_writes_requested_canvas() {
        let dir = std::env::temp_dir().join("bannerkit_cli_test_render");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let image = dir.join("photo.png");
        RgbaImage::from_pixel(40, 40, Rgba([0, 200, 0, 255]))
            .save(&image)
            .unwrap();

        run(
            RenderArgs {
                image,
                aspect: Some("4:5".to_string()),
                output: Some(dir.join("out")),
                name: Some("banner".to_string()),
                ..Default::default()
            },
            &AppConfig::default(),
        )
        .unwrap();

        let written = image::open(dir.join("out").join("banner.png")).unwrap();
        assert_eq!((written.width(), written.height()), (800, 1000));

        std::fs::remove_dir_all(&dir).ok();
    }
}
