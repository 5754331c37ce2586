use anyhow::{anyhow, Result};
use glam::{Vec2, Vec3};
use lyon::math::point;
use lyon::path::{FillRule, Path};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers,
};
use std::f32::consts::FRAC_PI_2;

use crate::font::Font;
use crate::geometry::MeshData;

/// Shape parameters of the extruded text mesh
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 0.5,
            depth: 0.2,
            curve_segments: 12,
            bevel_enabled: true,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            bevel_offset: 0.0,
            bevel_segments: 5,
        }
    }
}

/// Build an extruded, beveled mesh for `text`. The caller centers it.
pub fn text_mesh(font: &Font, text: &str, style: &TextStyle) -> Result<MeshData> {
    let contours = font.layout(text, style.size, style.curve_segments)?;
    extrude(&contours, style)
}

/// Extrude closed 2D contours along +z with front/back caps and an
/// optional rounded bevel ring at each cap
pub fn extrude(contours: &[Vec<Vec2>], style: &TextStyle) -> Result<MeshData> {
    let mut mesh = MeshData::default();
    if contours.is_empty() {
        return Ok(mesh);
    }

    let bevel_thickness = if style.bevel_enabled {
        style.bevel_thickness
    } else {
        0.0
    };
    let back_z = -bevel_thickness;
    let front_z = style.depth + bevel_thickness;

    let caps = fill_caps(contours)?;
    add_cap(&mut mesh, &caps, back_z, -Vec3::Z);
    add_cap(&mut mesh, &caps, front_z, Vec3::Z);

    let sign = solid_winding_sign(contours);
    let profile = wall_profile(style);
    for contour in contours {
        if contour.len() >= 3 {
            add_walls(&mut mesh, contour, sign, &profile);
        }
    }

    Ok(mesh)
}

struct CapFill {
    points: Vec<Vec2>,
    indices: Vec<u32>,
}

/// Triangulate the glyph interiors, holes included
fn fill_caps(contours: &[Vec<Vec2>]) -> Result<CapFill> {
    let mut builder = Path::builder();
    for contour in contours {
        if contour.len() < 3 {
            continue;
        }
        builder.begin(point(contour[0].x, contour[0].y));
        for p in &contour[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::tolerance(0.001).with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
                let p = v.position();
                [p.x, p.y]
            }),
        )
        .map_err(|e| anyhow!("cap tessellation failed: {e:?}"))?;

    Ok(CapFill {
        points: buffers
            .vertices
            .iter()
            .map(|p| Vec2::new(p[0], p[1]))
            .collect(),
        indices: buffers.indices,
    })
}

fn add_cap(mesh: &mut MeshData, caps: &CapFill, z: f32, normal: Vec3) {
    let base = mesh.vertex_count() as u32;
    for p in &caps.points {
        mesh.push_vertex(Vec3::new(p.x, p.y, z), normal);
    }
    for tri in caps.indices.chunks_exact(3) {
        if normal.z > 0.0 {
            mesh.indices
                .extend_from_slice(&[base + tri[0], base + tri[1], base + tri[2]]);
        } else {
            mesh.indices
                .extend_from_slice(&[base + tri[0], base + tri[2], base + tri[1]]);
        }
    }
}

/// (contour offset, z) pairs describing the side silhouette from the back
/// cap to the front cap. The bevel swells the walls outward between caps.
fn wall_profile(style: &TextStyle) -> Vec<(f32, f32)> {
    if !style.bevel_enabled {
        return vec![(0.0, 0.0), (0.0, style.depth)];
    }

    let mut profile = Vec::new();
    for s in 0..=style.bevel_segments {
        let t = s as f32 / style.bevel_segments as f32;
        let offset = style.bevel_offset + style.bevel_size * (t * FRAC_PI_2).sin();
        let z = -style.bevel_thickness * (t * FRAC_PI_2).cos();
        profile.push((offset, z));
    }
    profile.push((style.bevel_offset + style.bevel_size, style.depth));
    for s in (0..style.bevel_segments).rev() {
        let t = s as f32 / style.bevel_segments as f32;
        let offset = style.bevel_offset + style.bevel_size * (t * FRAC_PI_2).sin();
        let z = style.depth + style.bevel_thickness * (t * FRAC_PI_2).cos();
        profile.push((offset, z));
    }
    profile
}

/// Winding sign of the dominant (outer) contour; holes wind the other
/// way, so one sign serves the whole glyph set
fn solid_winding_sign(contours: &[Vec<Vec2>]) -> f32 {
    let mut best_area: f32 = 0.0;
    for contour in contours {
        let area = signed_area(contour);
        if area.abs() > best_area.abs() {
            best_area = area;
        }
    }
    if best_area >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn signed_area(contour: &[Vec2]) -> f32 {
    let mut area = 0.0;
    for i in 0..contour.len() {
        let a = contour[i];
        let b = contour[(i + 1) % contour.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

/// Per-vertex expansion directions pointing away from the solid
fn contour_normals(contour: &[Vec2], sign: f32) -> Vec<Vec2> {
    let n = contour.len();
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let prev = contour[(i + n - 1) % n];
        let next = contour[(i + 1) % n];
        let e1 = (contour[i] - prev).normalize_or_zero();
        let e2 = (next - contour[i]).normalize_or_zero();
        let n1 = Vec2::new(e1.y, -e1.x) * sign;
        let n2 = Vec2::new(e2.y, -e2.x) * sign;
        let miter = n1 + n2;
        normals.push(if miter.length_squared() > 1e-12 {
            miter.normalize()
        } else {
            n1
        });
    }
    normals
}

fn add_walls(mesh: &mut MeshData, contour: &[Vec2], sign: f32, profile: &[(f32, f32)]) {
    let normals = contour_normals(contour, sign);
    let n = contour.len();

    // One vertex ring pair per profile segment: smooth around the contour,
    // flat along the profile
    for seg in profile.windows(2) {
        let (off_a, z_a) = seg[0];
        let (off_b, z_b) = seg[1];

        let tangent = Vec2::new(off_b - off_a, z_b - z_a).normalize_or_zero();
        // Outward normal of the profile segment in (offset, z) space
        let profile_normal = Vec2::new(tangent.y, -tangent.x);

        let base = mesh.vertex_count() as u32;
        for (p, n2d) in contour.iter().zip(&normals) {
            let normal =
                Vec3::new(n2d.x * profile_normal.x, n2d.y * profile_normal.x, profile_normal.y)
                    .normalize_or_zero();
            mesh.push_vertex(Vec3::new(p.x + n2d.x * off_a, p.y + n2d.y * off_a, z_a), normal);
            mesh.push_vertex(Vec3::new(p.x + n2d.x * off_b, p.y + n2d.y * off_b, z_b), normal);
        }

        for i in 0..n as u32 {
            let j = (i + 1) % n as u32;
            let a0 = base + i * 2;
            let a1 = base + i * 2 + 1;
            let b0 = base + j * 2;
            let b1 = base + j * 2 + 1;
            mesh.indices.extend_from_slice(&[a0, b0, b1]);
            mesh.indices.extend_from_slice(&[a0, b1, a1]);
        }
    }
}
