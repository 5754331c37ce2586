use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

use text_scene::geometry::MeshData;
use text_scene::scene::{MeshHandle, Scene, DONUT_COUNT};

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
mod scene_tests {
    use super::*;

    #[test]
    fn test_rotation_modifiers_are_drawn_once_with_fixed_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let scene = Scene::new(&mut rng);

        assert_eq!(scene.rotation_modifiers().len(), DONUT_COUNT);
        for &m in scene.rotation_modifiers() {
            assert!((0.0..1.0).contains(&m));
        }
    }

    #[test]
    fn test_population_adds_text_plus_donuts() {
        let scene = populated_scene(1);
        assert!(scene.is_populated());
        assert_eq!(scene.len(), 1 + DONUT_COUNT);
        assert_eq!(scene.donut_nodes().count(), DONUT_COUNT);
    }

    #[test]
    fn test_population_runs_only_once() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut scene = Scene::new(&mut rng);
        let mut uploads = 0;
        let mut upload = |_mesh: MeshData| {
            let handle = MeshHandle(uploads);
            uploads += 1;
            handle
        };

        let font = test_font();
        scene.populate(&font, &mut rng, &mut upload).unwrap();
        scene.populate(&font, &mut rng, &mut upload).unwrap();

        assert_eq!(scene.len(), 1 + DONUT_COUNT);
        // text mesh + one shared torus, nothing re-uploaded
        assert_eq!(uploads, 2);
    }

    #[test]
    fn test_donuts_share_one_torus_mesh() {
        let scene = populated_scene(3);
        let first = scene.donut_nodes().next().unwrap().mesh;
        assert!(scene.donut_nodes().all(|d| d.mesh == first));
        // and the text mesh is a different one
        assert_ne!(scene.nodes()[0].mesh, first);
    }

    #[test]
    fn test_donut_attributes_stay_in_range() {
        let scene = populated_scene(4);
        for donut in scene.donut_nodes() {
            for component in donut.position.to_array() {
                assert!((-5.0..5.0).contains(&component));
            }
            assert!((0.0..PI).contains(&donut.rotation.x));
            assert!((0.0..PI).contains(&donut.rotation.y));
            assert_eq!(donut.rotation.z, 0.0);
        }
    }

    #[test]
    fn test_donut_scale_is_uniform_and_clamped() {
        let scene = populated_scene(5);
        for donut in scene.donut_nodes() {
            let s = donut.scale;
            assert_eq!(s.x, s.y);
            assert_eq!(s.y, s.z);
            assert!(s.x >= 0.2 && s.x <= 1.0);
        }
    }

    #[test]
    fn test_update_sets_both_axes_to_elapsed_times_pi_times_modifier() {
        let mut scene = populated_scene(6);
        let elapsed = 3.25;

        scene.update(elapsed);

        let modifiers: Vec<f32> = scene.rotation_modifiers().to_vec();
        for (donut, m) in scene.donut_nodes().zip(modifiers) {
            let expected = elapsed * PI * m;
            assert_eq!(donut.rotation.x, expected);
            assert_eq!(donut.rotation.y, expected);
        }
    }

    #[test]
    fn test_update_leaves_position_and_scale_alone() {
        let mut scene = populated_scene(7);
        let before: Vec<_> = scene
            .donut_nodes()
            .map(|d| (d.position, d.scale))
            .collect();

        scene.update(42.0);

        let after: Vec<_> = scene
            .donut_nodes()
            .map(|d| (d.position, d.scale))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_before_population_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut scene = Scene::new(&mut rng);

        scene.update(5.0);

        assert!(scene.is_empty());
        assert!(!scene.is_populated());
    }

    #[test]
    fn test_membership_never_decreases_across_updates() {
        let mut scene = populated_scene(9);
        let len = scene.len();
        for i in 0..50 {
            scene.update(i as f32 * 0.016);
            assert_eq!(scene.len(), len);
        }
    }

    #[test]
    fn test_text_node_sits_at_the_origin() {
        let scene = populated_scene(10);
        let text = &scene.nodes()[0];
        assert_eq!(text.position.to_array(), [0.0, 0.0, 0.0]);
        assert_eq!(text.scale.to_array(), [1.0, 1.0, 1.0]);
    }
}
