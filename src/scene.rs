use anyhow::Result;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::PI;

use crate::font::Font;
use crate::geometry::{self, MeshData};
use crate::text::{text_mesh, TextStyle};

/// Fixed donut population size
pub const DONUT_COUNT: usize = 100;
/// The string rendered as the centered text mesh
pub const TEXT: &str = "Hello Three.js";

const TORUS_RADIUS: f32 = 0.3;
const TORUS_TUBE: f32 = 0.2;
const TORUS_RADIAL_SEGMENTS: u32 = 32;
const TORUS_TUBULAR_SEGMENTS: u32 = 64;

/// Index into the renderer's uploaded mesh table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHandle(pub usize);

/// One renderable: a mesh reference plus its transform
#[derive(Debug, Clone)]
pub struct Node {
    pub mesh: MeshHandle,
    pub position: Vec3,
    /// Euler XYZ rotation in radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Node {
    fn at_origin(mesh: MeshHandle) -> Self {
        Self {
            mesh,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// Append-only scene graph. Nodes are never removed; the rotation-modifier
/// sequence is drawn once at startup and stays index-aligned with the
/// donut nodes.
pub struct Scene {
    nodes: Vec<Node>,
    rotation_modifiers: Vec<f32>,
    donuts: Vec<usize>,
    populated: bool,
}

impl Scene {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            nodes: Vec::new(),
            rotation_modifiers: (0..DONUT_COUNT).map(|_| rng.gen::<f32>()).collect(),
            donuts: Vec::new(),
            populated: false,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn rotation_modifiers(&self) -> &[f32] {
        &self.rotation_modifiers
    }

    /// Donut nodes in modifier order
    pub fn donut_nodes(&self) -> impl Iterator<Item = &Node> {
        self.donuts.iter().map(|&i| &self.nodes[i])
    }

    /// Build and register everything that waits on the font: the centered
    /// text mesh and the donut cloud sharing one torus mesh. Runs once;
    /// later calls are no-ops. `upload` turns built mesh data into a
    /// handle the renderer can draw.
    pub fn populate(
        &mut self,
        font: &Font,
        rng: &mut impl Rng,
        upload: &mut dyn FnMut(MeshData) -> MeshHandle,
    ) -> Result<()> {
        if self.populated {
            return Ok(());
        }

        let mut text = text_mesh(font, TEXT, &TextStyle::default())?;
        text.center();
        let text_handle = upload(text);
        self.nodes.push(Node::at_origin(text_handle));

        let torus_handle = upload(geometry::torus(
            TORUS_RADIUS,
            TORUS_TUBE,
            TORUS_RADIAL_SEGMENTS,
            TORUS_TUBULAR_SEGMENTS,
        ));

        for _ in 0..DONUT_COUNT {
            let mut donut = Node::at_origin(torus_handle);
            donut.position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 10.0,
                (rng.gen::<f32>() - 0.5) * 10.0,
                (rng.gen::<f32>() - 0.5) * 10.0,
            );
            donut.rotation.x = rng.gen::<f32>() * PI;
            donut.rotation.y = rng.gen::<f32>() * PI;
            let scale = (rng.gen::<f32>() + 0.2).min(1.0);
            donut.scale = Vec3::splat(scale);

            self.donuts.push(self.nodes.len());
            self.nodes.push(donut);
        }

        self.populated = true;
        log::info!(
            "scene populated: \"{TEXT}\" plus {DONUT_COUNT} donuts ({} nodes)",
            self.nodes.len()
        );
        Ok(())
    }

    /// Per-frame donut spin: both rotation axes get the same value,
    /// elapsed time scaled by the donut's own modifier. A no-op until
    /// population has run.
    pub fn update(&mut self, elapsed: f32) {
        for (i, &node) in self.donuts.iter().enumerate() {
            let angle = elapsed * PI * self.rotation_modifiers[i];
            let donut = &mut self.nodes[node];
            donut.rotation.x = angle;
            donut.rotation.y = angle;
        }
    }
}
