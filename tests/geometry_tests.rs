use glam::Vec3;
use text_scene::geometry::{torus, MeshData};
use text_scene::text::{text_mesh, TextStyle};

mod support;
use support::test_font;

#[cfg(test)]
mod geometry_tests {
    use super::*;

    #[test]
    fn test_torus_counts_for_demo_parameters() {
        let mesh = torus(0.3, 0.2, 32, 64);
        assert_eq!(mesh.vertex_count(), (32 + 1) * (64 + 1));
        assert_eq!(mesh.triangle_count(), 32 * 64 * 2);
    }

    #[test]
    fn test_torus_fits_inside_its_outer_radius() {
        let mesh = torus(0.3, 0.2, 16, 32);
        let (min, max) = mesh.bounds();
        assert!(max.x <= 0.5 + 1e-5 && min.x >= -0.5 - 1e-5);
        assert!(max.z <= 0.2 + 1e-5 && min.z >= -0.2 - 1e-5);
    }

    #[test]
    fn test_torus_indices_stay_in_bounds() {
        let mesh = torus(0.3, 0.2, 8, 16);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_text_mesh_builds_and_centers() {
        let font = test_font();
        let style = TextStyle::default();

        let mut mesh = text_mesh(&font, "Hello Three.js", &style).unwrap();
        assert!(mesh.triangle_count() > 0);

        mesh.center();
        let (min, max) = mesh.bounds();
        let center = (min + max) * 0.5;
        assert!(center.length() < 1e-4);
    }

    #[test]
    fn test_text_mesh_depth_includes_bevel() {
        let font = test_font();
        let style = TextStyle::default();

        let mesh = text_mesh(&font, "Ho", &style).unwrap();
        let (min, max) = mesh.bounds();
        let expected = style.depth + 2.0 * style.bevel_thickness;
        assert!(((max.z - min.z) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_text_mesh_normals_are_unit_length() {
        let font = test_font();
        let mesh = text_mesh(&font, "T", &TextStyle::default()).unwrap();
        for n in &mesh.normals {
            let len = Vec3::from_array(*n).length();
            assert!((len - 1.0).abs() < 1e-3, "normal length {len}");
        }
    }

    #[test]
    fn test_whitespace_only_text_is_empty() {
        let font = test_font();
        let mesh = text_mesh(&font, "   ", &TextStyle::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn test_center_is_idempotent() {
        let mut mesh = MeshData::default();
        mesh.push_vertex(Vec3::new(2.0, 4.0, 6.0), Vec3::Z);
        mesh.push_vertex(Vec3::new(4.0, 8.0, 10.0), Vec3::Z);

        mesh.center();
        let first = mesh.positions.clone();
        mesh.center();

        assert_eq!(first, mesh.positions);
    }
}
