use std::time::Instant;

/// Monotonic elapsed-time source for the render loop.
/// Started once at process init; never paused or reset while running.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_elapsed_grows() {
        let clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let first = clock.elapsed();

        thread::sleep(Duration::from_millis(10));
        let second = clock.elapsed();

        assert!(first >= 0.009);
        assert!(second > first);
    }
}
