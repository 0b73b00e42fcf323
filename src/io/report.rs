//! Run statistics and the batch summary line

use std::fmt;
use std::time::Duration;

/// Tally of validated and rejected grids over one batch run
#[derive(Clone, Copy, Debug, Default)]
pub struct RunStats {
    /// Grids (or transform results) that validated
    pub valid: usize,
    /// Grids that failed validation or were unchanged
    pub invalid: usize,
}

impl RunStats {
    /// Start an empty tally
    pub const fn new() -> Self {
        Self {
            valid: 0,
            invalid: 0,
        }
    }

    /// Record one outcome
    pub const fn record(&mut self, passed: bool) {
        if passed {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
    }

    /// Outcomes recorded so far
    pub const fn total(&self) -> usize {
        self.valid + self.invalid
    }

    /// Fraction of outcomes that validated
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.valid as f64 / self.total() as f64
        }
    }

    /// Build the one-line run summary
    pub fn summary(&self, mode: &str, assured: bool, elapsed: Duration) -> RunSummary {
        RunSummary {
            stats: *self,
            mode: mode.to_owned(),
            assured,
            elapsed,
        }
    }
}

/// Formatted end-of-run diagnostics
#[derive(Clone, Debug)]
pub struct RunSummary {
    stats: RunStats,
    mode: String,
    assured: bool,
    elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.elapsed.as_secs_f64() * 1000.0;
        let duration = if millis > 1000.0 {
            format!("{:.2} seconds", millis / 1000.0)
        } else {
            format!("{millis:.2} milliseconds")
        };
        let average = if self.stats.total() == 0 {
            0.0
        } else {
            millis / self.stats.total() as f64
        };

        writeln!(
            f,
            "Mode: {} | {}",
            self.mode,
            if self.assured { "Assured" } else { "Default" }
        )?;
        writeln!(f)?;
        write!(
            f,
            "Total: {} | Valid: {} | Invalid: {} | Success Rate: {:.2}% | Total Duration: {} | Average: {:.5} milliseconds",
            self.stats.total(),
            self.stats.valid,
            self.stats.invalid,
            self.stats.success_rate() * 100.0,
            duration,
            average
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_tracks_outcomes() {
        let mut stats = RunStats::new();
        assert!((stats.success_rate() - 0.0).abs() < f64::EPSILON);

        stats.record(true);
        stats.record(true);
        stats.record(false);
        assert_eq!(stats.total(), 3);
        assert!((stats.success_rate() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn summary_reports_the_tally() {
        let mut stats = RunStats::new();
        stats.record(true);
        stats.record(false);
        let line = stats
            .summary("transform", true, Duration::from_millis(10))
            .to_string();
        assert!(line.contains("Valid: 1"));
        assert!(line.contains("Invalid: 1"));
        assert!(line.contains("Assured"));
        assert!(line.contains("50.00%"));
    }
}
