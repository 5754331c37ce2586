use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;
/// Where the camera sits before the fly-through takes over
pub const INITIAL_POSITION: Vec3 = Vec3::new(2.79, 1.93, 5.0);

/// Perspective camera looking at a fixed target
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub aspect: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: INITIAL_POSITION,
            target: Vec3::ZERO,
            aspect,
            fov_y_degrees: FOV_Y_DEGREES,
            near: NEAR,
            far: FAR,
        }
    }

    /// Recompute the projection aspect after a viewport resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Damped orbit controls. Pointer drags accumulate a spherical rotation
/// residual that bleeds into the camera position a fraction per frame, so
/// releasing the pointer leaves the camera gliding to a stop. Shares the
/// camera position with the fly-through; last writer wins within a tick.
#[derive(Debug)]
pub struct OrbitControls {
    dragging: bool,
    last_pointer: Option<Vec2>,
    residual_theta: f32,
    residual_phi: f32,
    damping: f32,
    rotate_speed: f32,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            dragging: false,
            last_pointer: None,
            residual_theta: 0.0,
            residual_phi: 0.0,
            damping: 0.05,
            rotate_speed: 1.0,
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.last_pointer = None;
        }
    }

    /// Feed a pointer position in logical pixels
    pub fn pointer_moved(&mut self, x: f32, y: f32, viewport_height: f32) {
        let pointer = Vec2::new(x, y);
        if self.dragging {
            if let Some(last) = self.last_pointer {
                let delta = (pointer - last) / viewport_height.max(1.0);
                self.residual_theta -= delta.x * 2.0 * PI * self.rotate_speed;
                self.residual_phi -= delta.y * 2.0 * PI * self.rotate_speed;
            }
        }
        self.last_pointer = Some(pointer);
    }

    /// Un-applied rotation left in the damper
    pub fn residual(&self) -> Vec2 {
        Vec2::new(self.residual_theta, self.residual_phi)
    }

    /// One damping step: apply a fraction of the residual rotation to the
    /// camera position around its target
    pub fn update(&mut self, camera: &mut Camera) {
        let theta_step = self.residual_theta * self.damping;
        let phi_step = self.residual_phi * self.damping;
        self.residual_theta -= theta_step;
        self.residual_phi -= phi_step;

        if theta_step == 0.0 && phi_step == 0.0 {
            return;
        }

        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius < f32::EPSILON {
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        theta += theta_step;
        phi = (phi - phi_step).clamp(1e-4, PI - 1e-4);

        camera.position = camera.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
