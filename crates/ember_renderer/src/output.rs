//! Image output.
//!
//! Converts linear colors to 8-bit channels and encodes them as plain-text
//! PPM (`P3`) or PNG.

use crate::error::{OutputError, OutputResult};
use crate::{Color, ImageBuffer};
use ember_math::Interval;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

/// Channel range that quantizes into `[0, 255]`.
const INTENSITY: Interval = Interval {
    min: 0.0,
    max: 0.999,
};

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize one linear channel to a byte.
#[inline]
pub fn channel_to_byte(value: f64, gamma: bool) -> u8 {
    let value = if gamma { linear_to_gamma(value) } else { value };
    // NaN falls through clamp unchanged and `as u8` maps it to 0
    (255.999 * INTENSITY.clamp(value)) as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color, gamma: bool) -> [u8; 3] {
    [
        channel_to_byte(color.x, gamma),
        channel_to_byte(color.y, gamma),
        channel_to_byte(color.z, gamma),
    ]
}

fn check_size(image: &ImageBuffer) -> OutputResult<()> {
    let expected = image.width as usize * image.height as usize;
    if image.pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            width: image.width,
            height: image.height,
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Format an image as a complete plain-text PPM document.
pub fn encode_ppm(image: &ImageBuffer, gamma: bool) -> OutputResult<String> {
    check_size(image)?;

    // "255 255 255\n" is the longest pixel line
    let mut out = String::with_capacity(16 + image.pixels.len() * 12);
    out.push_str("P3\n");
    out.push_str(&format!("{} {}\n", image.width, image.height));
    out.push_str("255\n");

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color, gamma);
        out.push_str(&format!("{} {} {}\n", r, g, b));
    }

    Ok(out)
}

/// Write an image as plain-text PPM.
///
/// The document is formatted in memory first and handed to the writer in a
/// single `write_all`, so a bad image never emits a partial header.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W, gamma: bool) -> OutputResult<()> {
    let document = encode_ppm(image, gamma)?;
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Encode an image as an 8-bit PNG using the same quantization as PPM.
pub fn write_png<W: Write + Seek>(image: &ImageBuffer, writer: &mut W, gamma: bool) -> OutputResult<()> {
    check_size(image)?;

    let bytes: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|color| color_to_rgb(*color, gamma))
        .collect();

    let buffer = image::RgbImage::from_raw(image.width, image.height, bytes).ok_or(
        OutputError::SizeMismatch {
            width: image.width,
            height: image.height,
            expected: image.width as usize * image.height as usize,
            actual: image.pixels.len(),
        },
    )?;
    buffer.write_to(writer, image::ImageOutputFormat::Png)?;
    writer.flush()?;
    Ok(())
}

/// Save an image as a PNG file at `path`.
pub fn save_png(image: &ImageBuffer, path: &Path, gamma: bool) -> OutputResult<()> {
    check_size(image)?;

    let mut writer = BufWriter::new(File::create(path)?);
    write_png(image, &mut writer, gamma)?;

    log::info!("Saved {}x{} PNG to {}", image.width, image.height, path.display());
    Ok(())
}
