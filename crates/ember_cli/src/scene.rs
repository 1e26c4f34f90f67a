use crate::cli::SceneArg;
use ember_math::Point3;
use ember_renderer::{HittableList, Sphere};

/// Build one of the built-in scenes.
pub fn build_scene(scene: SceneArg) -> HittableList {
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5)));

    if let SceneArg::Ground = scene {
        world.add(Box::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0)));
    }

    log::debug!("Built {:?} scene with {} objects", scene, world.len());
    world
}
