//! Random sampling helpers.
//!
//! Every function draws from a caller-provided generator so renders are
//! reproducible from a seed.

use ember_math::{DVec2, DVec3};
use rand::{Rng, RngCore};

/// Uniform `f64` in `[0, 1)`.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform `f64` in `[min, max)`.
#[inline]
pub fn gen_f64_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Random point in the square `[-0.5, 0.5) x [-0.5, 0.5)`.
pub fn sample_square(rng: &mut dyn RngCore) -> DVec2 {
    DVec2::new(gen_f64(rng) - 0.5, gen_f64(rng) - 0.5)
}

/// Random unit vector, uniform over the sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> DVec3 {
    // Rejection sampling inside the unit ball, then project to the surface
    loop {
        let v = DVec3::new(
            gen_f64_range(rng, -1.0, 1.0),
            gen_f64_range(rng, -1.0, 1.0),
            gen_f64_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-160 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random unit vector, uniform over the hemisphere around `normal`.
pub fn random_on_hemisphere(normal: DVec3, rng: &mut dyn RngCore) -> DVec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}
