use glam::Vec3;

/// First corner of the camera fly-through
pub const FLY_START: Vec3 = Vec3::new(-4.0, -1.0, 1.8);
/// Second corner of the camera fly-through
pub const FLY_END: Vec3 = Vec3::new(3.0, 2.0, 5.0);
/// Seconds for one leg of the fly-through
pub const FLY_DURATION: f32 = 10.0;

/// Time remapping applied to a single tween leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    InOutQuad,
}

impl Easing {
    pub fn apply(&self, u: f32) -> f32 {
        match self {
            Easing::Linear => u,
            Easing::InOutQuad => ease_in_out_quad(u),
        }
    }
}

/// Quadratic ease-in-out: accelerates through the first half,
/// decelerates through the second
pub fn ease_in_out_quad(u: f32) -> f32 {
    if u < 0.5 {
        2.0 * u * u
    } else {
        let v = -2.0 * u + 2.0;
        1.0 - v * v / 2.0
    }
}

/// Infinitely repeating back-and-forth interpolation between two points.
/// Each leg carries its own easing; the demo runs the outbound leg linear
/// and eases only the return, which is deliberate.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    out_easing: Easing,
    back_easing: Easing,
}

impl Tween {
    /// Yoyo tween with a linear outbound leg and an eased return leg
    pub fn yoyo(from: Vec3, to: Vec3, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            out_easing: Easing::Linear,
            back_easing: Easing::InOutQuad,
        }
    }

    /// One full out-and-back cycle in seconds
    pub fn period(&self) -> f32 {
        self.duration * 2.0
    }

    /// Position at absolute time `t`; pure and periodic with `period()`
    pub fn sample(&self, t: f32) -> Vec3 {
        let local = t.rem_euclid(self.period());
        if local < self.duration {
            let u = local / self.duration;
            self.from.lerp(self.to, self.out_easing.apply(u))
        } else {
            let u = (local - self.duration) / self.duration;
            self.to.lerp(self.from, self.back_easing.apply(u))
        }
    }
}

/// The camera path used by the demo
pub fn camera_fly_through() -> Tween {
    Tween::yoyo(FLY_START, FLY_END, FLY_DURATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_fixed_points() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_in_out_quad(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
