//! Fixed-timestep runs of the per-frame state advance, decoupled from any
//! window or display pacing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

use text_scene::camera::{Camera, OrbitControls};
use text_scene::frame::advance;
use text_scene::geometry::MeshData;
use text_scene::renderer::surface_extent;
use text_scene::scene::{MeshHandle, Scene};
use text_scene::tween::{camera_fly_through, FLY_END, FLY_START};

mod support;
use support::test_font;

fn populated_scene(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new(&mut rng);
    let mut uploads = 0;
    let mut upload = |_mesh: MeshData| {
        let handle = MeshHandle(uploads);
        uploads += 1;
        handle
    };
    scene
        .populate(&test_font(), &mut rng, &mut upload)
        .unwrap();
    scene
}

#[cfg(test)]
mod loop_tests {
    use super::*;

    #[test]
    fn test_ticking_an_empty_scene_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut scene = Scene::new(&mut rng);
        let mut camera = Camera::new(800.0 / 600.0);
        let mut controls = OrbitControls::new();
        let fly = camera_fly_through();

        for i in 0..120 {
            advance(&mut scene, &fly, &mut controls, &mut camera, i as f32 / 60.0);
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn test_tick_drives_donuts_and_camera_together() {
        let mut scene = populated_scene(11);
        let mut camera = Camera::new(800.0 / 600.0);
        let mut controls = OrbitControls::new();
        let fly = camera_fly_through();

        let elapsed = 2.5;
        advance(&mut scene, &fly, &mut controls, &mut camera, elapsed);

        // camera a quarter along the outbound leg
        assert!((camera.position - FLY_START.lerp(FLY_END, 0.25)).length() < 1e-5);

        let m = scene.rotation_modifiers()[0];
        let first = scene.donut_nodes().next().unwrap();
        assert_eq!(first.rotation.x, elapsed * PI * m);
        assert_eq!(first.rotation.y, elapsed * PI * m);
    }

    #[test]
    fn test_fixed_timestep_run_is_deterministic_in_time() {
        let mut scene_a = populated_scene(12);
        let mut scene_b = populated_scene(12);
        let fly = camera_fly_through();

        let mut camera_a = Camera::new(1.0);
        let mut camera_b = Camera::new(1.0);
        let mut controls_a = OrbitControls::new();
        let mut controls_b = OrbitControls::new();

        // Coarse and fine stepping agree at the shared end time because
        // the update is a function of elapsed time, not of step count
        for i in 1..=10 {
            advance(&mut scene_a, &fly, &mut controls_a, &mut camera_a, i as f32);
        }
        for i in 1..=100 {
            advance(
                &mut scene_b,
                &fly,
                &mut controls_b,
                &mut camera_b,
                i as f32 / 10.0,
            );
        }

        assert_eq!(camera_a.position, camera_b.position);
        for (a, b) in scene_a.donut_nodes().zip(scene_b.donut_nodes()) {
            assert_eq!(a.rotation, b.rotation);
        }
    }

    #[test]
    fn test_orbit_drag_still_applies_after_fly_through_write() {
        let mut scene = populated_scene(13);
        let mut camera = Camera::new(1.0);
        let mut controls = OrbitControls::new();
        let fly = camera_fly_through();

        controls.set_dragging(true);
        controls.pointer_moved(0.0, 0.0, 600.0);
        controls.pointer_moved(150.0, 0.0, 600.0);

        advance(&mut scene, &fly, &mut controls, &mut camera, 2.5);

        // Same leg position the undragged camera would get, rotated away
        let undragged = FLY_START.lerp(FLY_END, 0.25);
        assert!((camera.position.length() - undragged.length()).abs() < 1e-4);
        assert!((camera.position - undragged).length() > 1e-3);
    }

    #[test]
    fn test_resize_scenario_from_spec() {
        // (800,600) -> (1200,900) at pixel ratio 1
        let mut camera = Camera::new(800.0 / 600.0);

        camera.set_aspect(1200.0 / 900.0);
        assert_eq!(camera.aspect, 1200.0 / 900.0);
        assert_eq!(surface_extent(1200, 900, 1.0), (1200, 900));

        // ratio above the clamp still maps through 2.0
        assert_eq!(surface_extent(1200, 900, 2.5), (2400, 1800));
    }
}
