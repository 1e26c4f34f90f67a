//! Simple path tracer example.
//!
//! Renders the sphere-on-ground scene and saves it in PPM format.

use ember_renderer::{
    render, write_ppm, CameraConfig, HittableList, Point3, RenderConfig, Sphere,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ember Path Tracer - Simple Example");
    println!("==================================");

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5)));
    world.add(Box::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0)));
    println!("Created {} objects", world.len());

    let camera = CameraConfig::default()
        .with_aspect_ratio(16.0 / 9.0)
        .with_image_width(400)
        .build()?;
    let config = RenderConfig::default().with_quality(50, 10);

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width(),
        camera.image_height(),
        config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(0);
    let image = render(&camera, &world, &config, &mut rng)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    let mut writer = BufWriter::new(File::create(filename)?);
    write_ppm(&image, &mut writer, true)?;
    println!("Saved to {}", filename);

    Ok(())
}
