//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Diffuse bounces up to a configurable depth
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling

use crate::error::{ConfigError, ConfigResult};
use crate::sampling::random_on_hemisphere;
use crate::{Camera, Color, Hittable};
use ember_math::{Interval, Ray};
use rand::RngCore;
use std::time::Instant;

/// Fraction of incoming light a diffuse surface reflects.
pub const DIFFUSE_REFLECTANCE: f64 = 0.5;

/// Default lower bound for intersection tests, to skip self-hits at a
/// bounce origin.
pub const DEFAULT_T_MIN: f64 = 0.001;

/// How surfaces are shaded when a ray hits them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shading {
    /// Bounce diffusely over the hemisphere around the normal.
    #[default]
    Diffuse,
    /// Map the surface normal to a color. No bounces.
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Lower bound of the intersection interval
    pub t_min: f64,
    /// Surface shading mode
    pub shading: Shading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            t_min: DEFAULT_T_MIN,
            shading: Shading::Diffuse,
        }
    }
}

impl RenderConfig {
    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the self-intersection epsilon.
    pub fn with_t_min(mut self, t_min: f64) -> Self {
        self.t_min = t_min;
        self
    }

    /// Set the shading mode.
    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamplesPerPixel);
        }
        if !self.t_min.is_finite() || self.t_min < 0.0 {
            return Err(ConfigError::InvalidTMin(self.t_min));
        }
        if self.t_min == 0.0 {
            log::warn!("t_min is 0: bounced rays may re-hit their own origin");
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Follows diffuse bounces until the ray escapes to the sky or `depth`
/// bounces have been spent. A budget of zero yields black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut attenuation = 1.0;

    for _ in 0..depth {
        let rec = match world.hit(&ray, Interval::new(config.t_min, f64::INFINITY)) {
            Some(rec) => rec,
            None => return attenuation * sky_gradient(&ray),
        };

        match config.shading {
            Shading::Normals => {
                return attenuation * 0.5 * (rec.normal + Color::ONE);
            }
            Shading::Diffuse => {
                let direction = random_on_hemisphere(rec.normal, rng);
                ray = Ray::new(rec.p, direction);
                attenuation *= DIFFUSE_REFLECTANCE;
            }
        }
    }

    // Bounce budget exhausted, no more light is gathered
    Color::ZERO
}

/// Compute sky gradient background.
///
/// White looking straight down, light blue looking straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, config, rng);
    }

    // Average the samples
    pixel_color * (1.0 / config.samples_per_pixel as f64)
}

/// Linear colors for a rendered image, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded, raster order.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ConfigResult<ImageBuffer> {
    render_with_progress(camera, world, config, rng, |_| {})
}

/// Render the entire scene, calling `progress` with the number of rows
/// still to go before each row starts.
pub fn render_with_progress<F>(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    mut progress: F,
) -> ConfigResult<ImageBuffer>
where
    F: FnMut(u32),
{
    config.validate()?;

    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    for y in 0..height {
        progress(height - y);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }
    progress(0);

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraConfig, HittableList, Sphere};
    use ember_math::{DVec3, Point3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_sphere_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5)));
        world
    }

    fn is_sky_color(color: Color) -> bool {
        // Convex combination of white and (0.5, 0.7, 1.0): blue is 1,
        // red and green move together from 1 down to (0.5, 0.7).
        let a = (1.0 - color.x) / 0.5;
        (0.0..=1.0).contains(&a)
            && (color.y - (1.0 - 0.3 * a)).abs() < 1e-12
            && (color.z - 1.0).abs() < 1e-12
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let down = Ray::new(Point3::ZERO, DVec3::new(0.0, -1.0, 0.0));
        assert_eq!(sky_gradient(&down), Color::new(1.0, 1.0, 1.0));

        let up = Ray::new(Point3::ZERO, DVec3::new(0.0, 3.0, 0.0));
        assert_eq!(sky_gradient(&up), Color::new(0.5, 0.7, 1.0));
    }

    #[test]
    fn test_depth_zero_is_black() {
        let world = single_sphere_world();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        for direction in [DVec3::NEG_Z, DVec3::Y, DVec3::new(0.3, -0.2, -1.0)] {
            let ray = Ray::new(Point3::ZERO, direction);
            assert_eq!(ray_color(&ray, &world, 0, &config, &mut rng), Color::ZERO);
        }

        let empty = HittableList::new();
        let ray = Ray::new(Point3::ZERO, DVec3::Y);
        assert_eq!(ray_color(&ray, &empty, 0, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_sky() {
        let world = HittableList::new();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(2);

        let down = Ray::new(Point3::ZERO, DVec3::NEG_Y);
        assert_eq!(ray_color(&down, &world, 5, &config, &mut rng), Color::ONE);

        let up = Ray::new(Point3::ZERO, DVec3::Y);
        assert_eq!(
            ray_color(&up, &world, 5, &config, &mut rng),
            Color::new(0.5, 0.7, 1.0)
        );

        for direction in [DVec3::X, DVec3::new(0.2, 0.4, -1.0), DVec3::new(-1.0, -0.7, 0.1)] {
            let ray = Ray::new(Point3::ZERO, direction);
            let color = ray_color(&ray, &world, 1, &config, &mut rng);
            assert!(is_sky_color(color), "{color:?} is not on the sky gradient");
        }
    }

    #[test]
    fn test_hit_with_single_bounce_budget_is_black() {
        // The bounced ray has no budget left
        let world = single_sphere_world();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        let ray = Ray::new(Point3::ZERO, DVec3::NEG_Z);
        assert_eq!(ray_color(&ray, &world, 1, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_single_bounce_is_half_of_sky() {
        // A lone sphere: every bounce off its front face escapes to the sky
        let world = single_sphere_world();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(4);

        let ray = Ray::new(Point3::ZERO, DVec3::NEG_Z);
        for _ in 0..50 {
            let color = ray_color(&ray, &world, 2, &config, &mut rng);
            assert!(is_sky_color(color * 2.0), "{color:?} is not half a sky color");
        }
    }

    #[test]
    fn test_closed_sphere_gathers_no_light() {
        // Inside a closed sphere light can never escape
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::ZERO, 10.0)));
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(5);

        let ray = Ray::new(Point3::ZERO, DVec3::new(0.3, 0.1, -1.0));
        assert_eq!(ray_color(&ray, &world, 6, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_normal_shading() {
        let world = single_sphere_world();
        let config = RenderConfig::default().with_shading(Shading::Normals);
        let mut rng = StdRng::seed_from_u64(6);

        // Straight on: normal is +Z
        let ray = Ray::new(Point3::ZERO, DVec3::NEG_Z);
        assert_eq!(
            ray_color(&ray, &world, 1, &config, &mut rng),
            Color::new(0.5, 0.5, 1.0)
        );

        // Depth zero still wins
        assert_eq!(ray_color(&ray, &world, 0, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());

        let zero_samples = RenderConfig::default().with_quality(0, 10);
        assert_eq!(zero_samples.validate(), Err(ConfigError::ZeroSamplesPerPixel));

        let negative = RenderConfig::default().with_t_min(-0.1);
        assert_eq!(negative.validate(), Err(ConfigError::InvalidTMin(-0.1)));

        let nan = RenderConfig::default().with_t_min(f64::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidTMin(_))));

        // Zero is allowed, it reproduces the unguarded behavior
        assert!(RenderConfig::default().with_t_min(0.0).validate().is_ok());
    }

    #[test]
    fn test_render_rejects_zero_samples_before_tracing() {
        let camera = CameraConfig::default().with_image_width(4).build().unwrap();
        let world = single_sphere_world();
        let config = RenderConfig::default().with_quality(0, 5);
        let mut rng = StdRng::seed_from_u64(7);

        let mut rows_seen = 0;
        let result = render_with_progress(&camera, &world, &config, &mut rng, |_| rows_seen += 1);
        assert_eq!(result.unwrap_err(), ConfigError::ZeroSamplesPerPixel);
        assert_eq!(rows_seen, 0);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let camera = CameraConfig::default().with_image_width(10).build().unwrap();
        let world = single_sphere_world();
        let config = RenderConfig::default().with_quality(4, 5);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel looks at the sphere; corner pixel sees only sky
        let center = render_pixel(&camera, &world, 5, 5, &config, &mut rng);
        let corner = render_pixel(&camera, &world, 0, 0, &config, &mut rng);

        assert!(center.length() > 0.0);
        assert!(center.z < corner.z);
        assert!(is_sky_color(corner));
    }

    #[test]
    fn test_render_dimensions_and_progress() {
        let camera = CameraConfig::default()
            .with_aspect_ratio(2.0)
            .with_image_width(8)
            .build()
            .unwrap();
        let world = single_sphere_world();
        let config = RenderConfig::default().with_quality(2, 3);
        let mut rng = StdRng::seed_from_u64(8);

        let mut reports = Vec::new();
        let image = render_with_progress(&camera, &world, &config, &mut rng, |remaining| {
            reports.push(remaining)
        })
        .unwrap();

        assert_eq!(image.width, 8);
        assert_eq!(image.height, 4);
        assert_eq!(image.pixels.len(), 32);
        assert_eq!(reports, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_render_is_deterministic_for_seed() {
        let camera = CameraConfig::default().with_image_width(12).build().unwrap();
        let world = single_sphere_world();
        let config = RenderConfig::default().with_quality(3, 4);

        let a = render(&camera, &world, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = render(&camera, &world, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(0.1, 0.2, 0.3));

        assert_eq!(image.get(2, 1), Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.pixels[5], Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.get(0, 0), Color::ZERO);
    }
}
