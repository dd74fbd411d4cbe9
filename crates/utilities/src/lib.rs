//! Shared diagnostics helpers for the capture crates.

use core::time::Duration;
use std::time::Instant;

use tracing::debug;

/// Timer for a pipeline made of named stages.
///
/// Each [`stage`](Self::stage) call logs the time since the previous one;
/// dropping the timer logs the total.
pub struct StageTimer {
    label: &'static str,
    start: Instant,
    last: Instant,
}

impl StageTimer {
    /// Start timing a pipeline.
    pub fn start(label: &'static str) -> Self {
        let now = Instant::now();
        Self {
            label,
            start: now,
            last: now,
        }
    }

    /// Mark the end of a stage and log its duration.
    pub fn stage(&mut self, stage: &str) {
        let now = Instant::now();
        debug!(
            "[{}] {stage} took {}",
            self.label,
            fmt_duration(now.duration_since(self.last))
        );
        self.last = now;
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        debug!(
            "[{}] total {}",
            self.label,
            fmt_duration(self.start.elapsed())
        );
    }
}

/// Render a duration with a unit that keeps the number small.
fn fmt_duration(duration: Duration) -> String {
    if duration.as_secs() >= 1 {
        format!("{:.2}s", duration.as_secs_f32())
    } else if duration.as_millis() >= 1 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{}µs", duration.as_micros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_pick_sensible_units() {
        assert_eq!(fmt_duration(Duration::from_secs(2)), "2.00s");
        assert_eq!(fmt_duration(Duration::from_millis(15)), "15ms");
        assert_eq!(fmt_duration(Duration::from_micros(70)), "70µs");
    }
}
