//! Report fonts and supported export formats.

use bannerkit_common::config::{config_file_path, AppConfig};
use bannerkit_render_engine::export::ExportFormat;
use bannerkit_render_engine::FontSet;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Bannerkit System Check");
    println!("{}", "=".repeat(50));

    let path = config_file_path();
    if path.exists() {
        println!("[OK] Config: {}", path.display());
    } else {
        println!("[OK] Config: defaults ({} not found)", path.display());
    }

    let fonts_ok = match FontSet::from_config(&config.fonts) {
        Ok(Some(fonts)) => {
            let source = fonts
                .source()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "in-memory".to_string());
            println!("[OK] Regular font: {source}");
            if fonts.has_bold() {
                println!("[OK] Bold font: loaded");
            } else {
                println!("[WARN] Bold font: not found, labels use the regular face");
            }
            true
        }
        Ok(None) => {
            println!("[WARN] No font found; set fonts.regular in {}", path.display());
            false
        }
        Err(e) => {
            println!("[FAIL] Configured font unusable: {e}");
            false
        }
    };

    let formats: Vec<String> = ExportFormat::ALL
        .iter()
        .map(|f| {
            if f.supports_alpha() {
                f.to_string()
            } else {
                format!("{f} (no alpha)")
            }
        })
        .collect();
    println!("[OK] Export formats: {}", formats.join(", "));
    println!("     Default: {}", config.export.format);

    println!();
    if fonts_ok {
        println!("Bannerkit is ready.");
    } else {
        println!("Images will render without text until a font is available.");
    }

    Ok(())
}
