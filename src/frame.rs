use crate::camera::{Camera, OrbitControls};
use crate::scene::Scene;
use crate::tween::Tween;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self {
            number,
            time,
            delta,
        }
    }
}

/// Advance all time-driven state by one tick, in loop order: donut spin,
/// fly-through camera write, orbit-control damping. Pure over its inputs
/// so tests can drive it with a fixed timestep instead of display pacing.
pub fn advance(
    scene: &mut Scene,
    fly: &Tween,
    controls: &mut OrbitControls,
    camera: &mut Camera,
    elapsed: f32,
) {
    scene.update(elapsed);
    camera.position = fly.sample(elapsed);
    controls.update(camera);
}
