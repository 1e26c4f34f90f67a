//! Error types for render configuration and image output.

use thiserror::Error;

/// Rejected camera or render settings.
///
/// Returned before any pixel is traced so a bad configuration never
/// produces a partial image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("aspect ratio must be a positive finite number, got {0}")]
    InvalidAspectRatio(f64),

    #[error("image width must be at least 1 pixel")]
    ZeroImageWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamplesPerPixel,

    #[error("image of {width}x{height} pixels exceeds the supported size")]
    ImageTooLarge { width: u32, height: f64 },

    #[error("t_min must be a non-negative finite number, got {0}")]
    InvalidTMin(f64),
}

/// Errors raised while encoding or writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;
