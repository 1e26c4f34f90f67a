use clap::{Parser, ValueEnum};
use ember_renderer::{Shading, DEFAULT_T_MIN};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Surface shading modes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShadingArg {
    /// Diffuse bounces against the sky
    Diffuse,
    /// Surface normals as colors
    Normals,
}

impl From<ShadingArg> for Shading {
    fn from(arg: ShadingArg) -> Self {
        match arg {
            ShadingArg::Diffuse => Shading::Diffuse,
            ShadingArg::Normals => Shading::Normals,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneArg {
    /// One sphere floating in front of the camera
    Single,
    /// The sphere resting on a large ground sphere
    Ground,
}

/// Parse an aspect ratio given either as `W:H` (e.g. `16:9`) or a real number.
pub fn parse_aspect_ratio(s: &str) -> Result<f64, String> {
    let ratio = match s.split_once(':') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
            let h: f64 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
            w / h
        }
        None => s.trim().parse().map_err(|e| format!("bad aspect ratio '{s}': {e}"))?,
    };

    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("aspect ratio must be positive, got '{s}'"))
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "A minimal diffuse path tracer that writes PPM images")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Aspect ratio as W:H or a real number
    #[arg(long, default_value = "16:9", value_parser = parse_aspect_ratio)]
    pub aspect_ratio: f64,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    pub samples: u32,

    /// Maximum number of diffuse bounces per sample
    #[arg(long, short = 'd', default_value_t = 50)]
    pub max_depth: u32,

    /// Lower bound for intersection tests (self-intersection epsilon)
    #[arg(long, default_value_t = DEFAULT_T_MIN)]
    pub t_min: f64,

    /// Surface shading mode
    #[arg(long, value_enum, default_value_t = ShadingArg::Diffuse)]
    pub shading: ShadingArg,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneArg::Ground)]
    pub scene: SceneArg,

    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Apply gamma 2 before quantizing
    #[arg(long)]
    pub gamma: bool,

    /// Output file (.ppm or .png); PPM goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
