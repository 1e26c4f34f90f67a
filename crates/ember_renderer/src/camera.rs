//! Camera for ray generation.

use crate::error::{ConfigError, ConfigResult};
use crate::sampling::sample_square;
use ember_math::{DVec2, DVec3, Point3, Ray};
use rand::RngCore;

/// Distance from the camera center to the viewport plane.
pub const FOCAL_LENGTH: f64 = 1.0;

/// Height of the viewport in world units.
pub const VIEWPORT_HEIGHT: f64 = 2.0;

/// Largest image, in pixels, a camera will be built for.
pub const MAX_PIXELS: u64 = 1 << 28;

/// Image settings a [`Camera`] is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Ideal width / height ratio
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
        }
    }
}

impl CameraConfig {
    /// Set the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the image width.
    pub fn with_image_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self
    }

    /// Check the settings without building a camera.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.image_width == 0 {
            return Err(ConfigError::ZeroImageWidth);
        }

        let height = self.exact_image_height();
        if height > u32::MAX as f64 || self.image_width as f64 * height > MAX_PIXELS as f64 {
            return Err(ConfigError::ImageTooLarge {
                width: self.image_width,
                height,
            });
        }
        Ok(())
    }

    /// `round(width / aspect_ratio)`, at least 1, before any integer cast.
    fn exact_image_height(&self) -> f64 {
        (self.image_width as f64 / self.aspect_ratio).round().max(1.0)
    }

    /// Image height derived from width and aspect ratio, at least 1.
    ///
    /// Only meaningful for settings that pass [`CameraConfig::validate`].
    pub fn image_height(&self) -> u32 {
        self.exact_image_height() as u32
    }

    /// Validate and compute the viewport geometry.
    pub fn build(self) -> ConfigResult<Camera> {
        self.validate()?;

        let image_width = self.image_width;
        let image_height = self.image_height();

        // Use the rounded integer dimensions, not the requested ratio
        let viewport_width = VIEWPORT_HEIGHT * (image_width as f64 / image_height as f64);
        let center = Point3::ZERO;

        // Across the horizontal edge and down the vertical edge
        let viewport_u = DVec3::new(viewport_width, 0.0, 0.0);
        let viewport_v = DVec3::new(0.0, -VIEWPORT_HEIGHT, 0.0);

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - DVec3::new(0.0, 0.0, FOCAL_LENGTH) - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        log::debug!(
            "Camera {}x{}: viewport {:.4}x{:.4}, pixel00 {:?}",
            image_width,
            image_height,
            viewport_width,
            VIEWPORT_HEIGHT,
            pixel00_loc
        );

        Ok(Camera {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        })
    }
}

/// Pinhole camera at the origin looking down -Z.
///
/// All geometry is derived once by [`CameraConfig::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: DVec3,
    pixel_delta_v: DVec3,
}

impl Camera {
    /// Rendered image width in pixels.
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Rendered image height in pixels.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera center in world space.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// World position of the center of pixel (0, 0).
    pub fn pixel00_loc(&self) -> Point3 {
        self.pixel00_loc
    }

    /// Offset from one pixel to the next along a row.
    pub fn pixel_delta_u(&self) -> DVec3 {
        self.pixel_delta_u
    }

    /// Offset from one pixel to the next down a column.
    pub fn pixel_delta_v(&self) -> DVec3 {
        self.pixel_delta_v
    }

    /// Ray from the camera center through pixel (i, j) shifted by `offset`
    /// pixel units.
    pub fn ray_through(&self, i: u32, j: u32, offset: DVec2) -> Ray {
        let pixel_sample = self.pixel00_loc
            + (i as f64 + offset.x) * self.pixel_delta_u
            + (j as f64 + offset.y) * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Generate a ray for pixel (i, j) with a random sub-pixel jitter.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        self.ray_through(i, j, offset)
    }
}
