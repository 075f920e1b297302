use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use image::{DynamicImage, ImageReader};
use row_atlas_core::{AtlasBuilder, AtlasConfig, ParseSession, pack_layout};
use tracing::{error, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "row-atlas",
    about = "Pack material textures into a single-row atlas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into an atlas (writes name.png + name.json)
    Pack(PackArgs),
    /// Layout-only: read image sizes and print UV transforms as JSON
    Layout(LayoutArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// Max atlas width
    #[arg(long, default_value_t = row_atlas_core::DEFAULT_MAX_DIMENSION, help_heading = "Layout")]
    max_width: u32,
    /// Max atlas height
    #[arg(long, default_value_t = row_atlas_core::DEFAULT_MAX_DIMENSION, help_heading = "Layout")]
    max_height: u32,
    /// Fill for uncovered pixels as r,g,b,a (0..=255 each)
    #[arg(long, default_value = "0,0,0,0", help_heading = "Layout")]
    background: String,
    /// Dry run: generate and report stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Input/Output")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    /// Input file or directory
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Layout(args) => run_layout(args),
    }
}

fn run_pack(cli: &PackArgs) -> anyhow::Result<()> {
    let cfg = AtlasConfig::builder()
        .with_max_dimensions(cli.max_width, cli.max_height)
        .background_color(parse_rgba(&cli.background)?)
        .build();
    let mut builder = AtlasBuilder::with_config(cfg)?;

    let paths = gather_paths(&cli.input);
    for p in &paths {
        match load_image(p) {
            Ok(img) => builder.add_image(material_key(p), img)?,
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
    }
    info!(count = builder.len(), "loaded input images");
    if !builder.has_entries() {
        warn!(input = %cli.input.display(), "no images found; nothing to pack");
        return Ok(());
    }

    builder.generate()?;
    if let Some(stats) = builder.stats() {
        info!("{}", stats.summary());
    }

    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
        if let Some(atlas) = builder.atlas() {
            let png_path = cli.out_dir.join(format!("{}.png", cli.name));
            atlas
                .save(&png_path)
                .with_context(|| format!("write {}", png_path.display()))?;
            info!(?png_path, "atlas image written");
        }
        if let Some(json_value) = row_atlas_core::to_json(&builder) {
            let json_path = cli.out_dir.join(format!("{}.json", cli.name));
            let json = serde_json::to_string_pretty(&json_value)?;
            fs::write(&json_path, json)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, "atlas metadata written");
        }
    }

    let mut session = ParseSession::new();
    builder.cleanup(&mut session);
    Ok(())
}

fn run_layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let mut items: Vec<(String, u32, u32)> = Vec::new();
    for p in gather_paths(&args.input) {
        match image::image_dimensions(&p) {
            Ok((w, h)) => items.push((material_key(&p), w, h)),
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
    }
    let placed = pack_layout(items)?;
    let value: Vec<serde_json::Value> = placed
        .into_iter()
        .map(|(key, uv)| serde_json::json!({ "key": key, "uv": uv }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn gather_paths(path: &Path) -> Vec<PathBuf> {
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    list
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif")
    )
}

/// Material key for a texture file: its file stem.
fn material_key(p: &Path) -> String {
    p.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.to_string_lossy().replace('\\', "/"))
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img)
}

fn parse_rgba(s: &str) -> anyhow::Result<[u8; 4]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        anyhow::bail!("background must be r,g,b,a; got '{}'", s);
    }
    let mut out = [0u8; 4];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .with_context(|| format!("invalid color channel '{}'", part))?;
    }
    Ok(out)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_background_color() {
        assert_eq!(parse_rgba("255, 0, 128,64").expect("rgba"), [255, 0, 128, 64]);
        assert!(parse_rgba("1,2,3").is_err());
        assert!(parse_rgba("1,2,3,300").is_err());
    }

    #[test]
    fn key_is_file_stem() {
        assert_eq!(material_key(Path::new("textures/brick_wall.png")), "brick_wall");
    }

    #[test]
    fn filters_by_extension() {
        assert!(is_image(Path::new("a/B.PNG")));
        assert!(!is_image(Path::new("a/model.obj")));
    }
}
