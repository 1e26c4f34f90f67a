use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{
    render_with_progress, write_png, write_ppm, CameraConfig, ImageBuffer, RenderConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

mod cli;
mod scene;

use cli::Args;
use scene::build_scene;

fn init_logger(args: &Args) {
    // RUST_LOG still wins over the command line level
    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();
}

fn progress_bar(rows: u32, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(rows as u64);
    pb.set_style(ProgressStyle::with_template(
        "Scanlines remaining: {msg} {bar:40} {pos}/{len} ETA: {eta}",
    )?);
    Ok(pb)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Where the finished image goes, opened before any rendering starts.
enum Output {
    Stdout,
    Ppm(PathBuf, BufWriter<File>),
    Png(PathBuf, BufWriter<File>),
}

impl Output {
    fn open(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Output::Stdout);
        };
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let writer = BufWriter::new(file);
        if is_png(path) {
            Ok(Output::Png(path.to_path_buf(), writer))
        } else {
            Ok(Output::Ppm(path.to_path_buf(), writer))
        }
    }

    fn write(self, image: &ImageBuffer, gamma: bool) -> Result<()> {
        match self {
            Output::Stdout => {
                let stdout = io::stdout();
                write_ppm(image, &mut stdout.lock(), gamma)
                    .context("Failed to write image to stdout")?;
            }
            Output::Ppm(path, mut writer) => {
                write_ppm(image, &mut writer, gamma)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("Saved to {}", path.display());
            }
            Output::Png(path, mut writer) => {
                write_png(image, &mut writer, gamma)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("Saved PNG to {}", path.display());
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    let camera = CameraConfig::default()
        .with_aspect_ratio(args.aspect_ratio)
        .with_image_width(args.width)
        .build()
        .context("Invalid camera settings")?;

    let config = RenderConfig::default()
        .with_quality(args.samples, args.max_depth)
        .with_t_min(args.t_min)
        .with_shading(args.shading.into());
    config.validate().context("Invalid render settings")?;

    // Fail on a bad output path now rather than after a long render
    let output = Output::open(args.output.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let world = build_scene(args.scene);

    let height = camera.image_height();
    let pb = progress_bar(height, args.quiet)?;
    let image = render_with_progress(&camera, &world, &config, &mut rng, |remaining| {
        pb.set_message(remaining.to_string());
        pb.set_position(u64::from(height - remaining));
    })
    .context("Invalid render settings")?;
    pb.finish_and_clear();

    output.write(&image, args.gamma)?;

    Ok(())
}
