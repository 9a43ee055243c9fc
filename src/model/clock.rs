use std::time::Instant;

/// Measures the time between successive ticks.
///
/// A stopped clock reports no elapsed time. After (re)starting, the first
/// reading only establishes a reference point and also reports zero, so time
/// spent stopped never leaks into a later delta.
#[derive(Debug, Clone)]
pub struct Clock {
    running: bool,
    last: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Clock {
            running: true,
            last: None,
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
        self.last = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last = None;
    }

    /// Seconds since the previous call.
    pub fn delta(&mut self, now: Instant) -> f64 {
        if !self.running {
            return 0.0;
        }

        let dt = match self.last {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);
        dt
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

    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn test_delta() {
        let t0 = Instant::now();
        let mut clock = Clock::new();

        assert_eq!(clock.delta(t0), 0.0);
        assert_relative_eq!(clock.delta(t0 + Duration::from_millis(16)), 0.016);
        assert_relative_eq!(clock.delta(t0 + Duration::from_millis(48)), 0.032);
    }

    #[test]
    fn test_stop_discards_elapsed_time() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        clock.delta(t0);

        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.delta(t0 + Duration::from_secs(5)), 0.0);

        clock.start();
        assert_eq!(clock.delta(t0 + Duration::from_secs(10)), 0.0);
        assert_relative_eq!(
            clock.delta(t0 + Duration::from_millis(10_020)),
            0.02,
            max_relative = 1e-9
        );
    }
}
