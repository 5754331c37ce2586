use glam::Vec3;
use std::f32::consts::TAU;

/// CPU-side triangle mesh, ready for upload
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    /// Axis-aligned bounds of all vertices
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            let p = Vec3::from_array(*p);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Translate so the bounding box is centered on the local origin.
    /// Rotation and scaling about the origin then read as centered.
    pub fn center(&mut self) {
        if self.positions.is_empty() {
            return;
        }
        let (min, max) = self.bounds();
        let offset = (min + max) * 0.5;
        for p in &mut self.positions {
            p[0] -= offset.x;
            p[1] -= offset.y;
            p[2] -= offset.z;
        }
    }
}

/// Torus tessellation: `radius` from the center to the tube center, `tube`
/// the tube radius. Matches the usual (radius, tube, radialSegments,
/// tubularSegments) parameterization.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;

            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (position - ring_center).normalize();

            mesh.push_vertex(position, normal);
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = (tubular_segments + 1) * j + i - 1;
            let b = (tubular_segments + 1) * (j - 1) + i - 1;
            let c = (tubular_segments + 1) * (j - 1) + i;
            let d = (tubular_segments + 1) * j + i;

            mesh.indices.extend_from_slice(&[a, b, d]);
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_has_expected_counts() {
        let mesh = torus(0.3, 0.2, 32, 64);
        assert_eq!(mesh.vertex_count(), 33 * 65);
        assert_eq!(mesh.triangle_count(), 32 * 64 * 2);
    }

    #[test]
    fn torus_vertices_lie_on_the_surface() {
        let mesh = torus(0.3, 0.2, 8, 16);
        for p in &mesh.positions {
            let p = Vec3::from_array(*p);
            let ring_distance = (p.x * p.x + p.y * p.y).sqrt() - 0.3;
            let tube_distance = (ring_distance * ring_distance + p.z * p.z).sqrt();
            assert!((tube_distance - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn torus_normals_are_unit_length() {
        let mesh = torus(0.3, 0.2, 8, 16);
        for n in &mesh.normals {
            let len = Vec3::from_array(*n).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn center_moves_bounds_onto_origin() {
        let mut mesh = MeshData::default();
        mesh.push_vertex(Vec3::new(1.0, 2.0, 3.0), Vec3::Z);
        mesh.push_vertex(Vec3::new(3.0, 6.0, 5.0), Vec3::Z);

        mesh.center();

        let (min, max) = mesh.bounds();
        assert_eq!(min + max, Vec3::ZERO);
    }
}
