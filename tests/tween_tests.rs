use glam::Vec3;
use text_scene::tween::{camera_fly_through, ease_in_out_quad, FLY_DURATION, FLY_END, FLY_START};

#[cfg(test)]
mod tween_tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_fly_through_starts_at_the_start_corner() {
        let tween = camera_fly_through();
        assert!(close(tween.sample(0.0), FLY_START));
    }

    #[test]
    fn test_fly_through_reaches_the_end_corner_after_one_leg() {
        let tween = camera_fly_through();
        assert!(close(tween.sample(FLY_DURATION), FLY_END));
    }

    #[test]
    fn test_fly_through_is_periodic_with_period_twenty() {
        let tween = camera_fly_through();
        assert_eq!(tween.period(), 20.0);

        for t in [0.0, 3.2, 10.0, 14.9, 19.0] {
            assert!(close(tween.sample(t), tween.sample(t + 20.0)));
            assert!(close(tween.sample(t), tween.sample(t + 40.0)));
        }
    }

    #[test]
    fn test_fly_through_yoyos_back_to_start() {
        let tween = camera_fly_through();
        assert!(close(tween.sample(20.0), FLY_START));
        assert!(close(tween.sample(30.0), FLY_END));
    }

    #[test]
    fn test_outbound_leg_is_linear() {
        let tween = camera_fly_through();
        let quarter = tween.sample(2.5);
        assert!(close(quarter, FLY_START.lerp(FLY_END, 0.25)));
    }

    #[test]
    fn test_return_leg_is_eased_not_linear() {
        let tween = camera_fly_through();

        // A quarter into the return leg the eased curve lags the linear one
        let eased = tween.sample(12.5);
        let expected = FLY_END.lerp(FLY_START, ease_in_out_quad(0.25));
        assert!(close(eased, expected));
        assert!(!close(eased, FLY_END.lerp(FLY_START, 0.25)));
    }

    #[test]
    fn test_return_leg_progress_is_monotonic() {
        let tween = camera_fly_through();
        let mut prev = 0.0;
        for i in 0..=100 {
            let t = 10.0 + 10.0 * i as f32 / 100.0;
            let progress = (tween.sample(t) - FLY_END).length();
            assert!(progress >= prev - 1e-5);
            prev = progress;
        }
    }

    #[test]
    fn test_both_legs_meet_at_the_midpoint() {
        let tween = camera_fly_through();
        let mid = FLY_START.lerp(FLY_END, 0.5);
        assert!(close(tween.sample(5.0), mid));
        assert!(close(tween.sample(15.0), mid));
    }
}
