//! Create and inspect style preset files.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use bannerkit_style_model::StyleParameters;

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    /// Write a preset holding the default parameters
    Init {
        /// Preset file to create
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a preset and print its parameters
    Show {
        /// Preset file to read
        file: PathBuf,
    },
}

pub fn run(command: PresetCommand) -> anyhow::Result<()> {
    match command {
        PresetCommand::Init { file, force } => init(&file, force),
        PresetCommand::Show { file } => show(&file),
    }
}

fn init(file: &Path, force: bool) -> anyhow::Result<()> {
    if file.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            file.display()
        ));
    }
    StyleParameters::default()
        .save(file)
        .map_err(|e| anyhow::anyhow!("Failed to write preset: {e}"))?;
    println!("Preset written: {}", file.display());
    Ok(())
}

fn show(file: &Path) -> anyhow::Result<()> {
    let params =
        StyleParameters::load(file).map_err(|e| anyhow::anyhow!("Failed to load preset: {e}"))?;
    let (width, height) = params.canvas_size();

    println!("Preset: {}", file.display());
    println!("  Canvas: {} ({width}x{height})", params.canvas_aspect);
    println!(
        "  Banner: {} {} at {}%",
        params.banner_layout, params.banner_color, params.banner_height_percent
    );
    let [brand, tagline, contact] = params.banner_texts();
    println!("  Texts: {brand} | {tagline} | {contact}");
    println!(
        "  Overlays: sticker={} cta={} watermark={}",
        params.sticker, params.cta, params.watermark_enabled
    );
    println!(
        "  Transform: zoom={} rotation={} flipped={}",
        params.transform.zoom, params.transform.rotation_degrees, params.transform.flipped
    );
    println!();
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_show_round_trips() {
        let dir = std::env::temp_dir().join("bannerkit_cli_test_preset_cmd");
        let _ = std::fs::remove_dir_all(&dir);
        let file = dir.join("nested").join("default.json");

        run(PresetCommand::Init {
            file: file.clone(),
            force: false,
        })
        .unwrap();
        assert_eq!(
            StyleParameters::load(&file).unwrap(),
            StyleParameters::default()
        );
        run(PresetCommand::Show { file: file.clone() }).unwrap();

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join("bannerkit_cli_test_preset_force");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("mine.json");
        std::fs::write(&file, "{\"brand_text\": \"Mine\"}").unwrap();

        assert!(init(&file, false).is_err());
        let kept = StyleParameters::load(&file).unwrap();
        assert_eq!(kept.brand_text, "Mine");

        init(&file, true).unwrap();
        assert_eq!(StyleParameters::load(&file).unwrap().brand_text, "");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_show_reports_invalid_preset() {
        let dir = std::env::temp_dir().join("bannerkit_cli_test_preset_bad");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("bad.json");
        std::fs::write(&file, "{\"banner_height_percent\": 250}").unwrap();

        assert!(show(&file).is_err());
        assert!(show(&dir.join("missing.json")).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
