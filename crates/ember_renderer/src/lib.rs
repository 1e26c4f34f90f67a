//! Ember renderer - CPU path tracing core.
//!
//! A small Monte Carlo path tracer: camera ray generation, closest-hit scene
//! queries, diffuse bounces against a sky gradient, and multi-sample
//! anti-aliasing. Randomness is always injected by the caller so a seed
//! fully determines the image.

mod camera;
mod error;
mod hittable;
mod output;
mod renderer;
pub mod sampling;
mod sphere;

pub use camera::{Camera, CameraConfig, FOCAL_LENGTH, MAX_PIXELS, VIEWPORT_HEIGHT};
pub use error::{ConfigError, ConfigResult, OutputError, OutputResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use output::{
    channel_to_byte, color_to_rgb, encode_ppm, linear_to_gamma, save_png, write_png, write_ppm,
};
pub use renderer::{
    ray_color, render, render_pixel, render_with_progress, sky_gradient, ImageBuffer,
    RenderConfig, Shading, DEFAULT_T_MIN, DIFFUSE_REFLECTANCE,
};
pub use sphere::Sphere;

/// Re-export vector and common math types from ember_math
pub use ember_math::{DVec2, DVec3, Interval, Point3, Ray};

/// Color type alias (linear RGB, unbounded)
pub type Color = DVec3;
