//! Pacing calibrator.
//!
//! Maintains the rolling accuracy ratio (actual / estimated duration) over
//! the most recent completions that carried a measured duration. The ratio
//! is read-only input to the decomposition gateway's pacing parameters and
//! has no other consumer.

use serde::{Deserialize, Serialize};

/// Number of recent completions the rolling mean covers.
pub const ACCURACY_WINDOW_LEN: usize = 5;

/// Bounded window of actual/estimated ratios.
///
/// A simple arithmetic mean over at most [`ACCURACY_WINDOW_LEN`] samples.
/// With fewer samples the mean covers whatever exists; with none the ratio
/// stays at its default of 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PacingWindow {
    ratios: Vec<f64>,
}

impl PacingWindow {
    /// Record one completion and return the updated rolling ratio.
    ///
    /// Estimates are floored at 1 minute upstream, so the division is safe;
    /// a zero estimate here is treated as 1 rather than poisoning the window.
    pub fn record(&mut self, actual_min: u32, est_min: u32) -> f64 {
        let est = est_min.max(1);
        self.ratios.push(actual_min as f64 / est as f64);
        if self.ratios.len() > ACCURACY_WINDOW_LEN {
            let excess = self.ratios.len() - ACCURACY_WINDOW_LEN;
            self.ratios.drain(..excess);
        }
        self.ratio()
    }

    /// Current rolling mean; 1.0 when no samples exist.
    pub fn ratio(&self) -> f64 {
        if self.ratios.is_empty() {
            return 1.0;
        }
        self.ratios.iter().sum::<f64>() / self.ratios.len() as f64
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_defaults_to_one() {
        assert_eq!(PacingWindow::default().ratio(), 1.0);
    }

    #[test]
    fn mean_over_three_samples() {
        // Estimates of 10 with actuals 10, 20, 15 -> mean ratio 1.5.
        let mut window = PacingWindow::default();
        window.record(10, 10);
        window.record(20, 10);
        let ratio = window.record(15, 10);
        assert!((ratio - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn window_keeps_only_last_five() {
        let mut window = PacingWindow::default();
        // Five slow completions, then five exact ones push them all out.
        for _ in 0..5 {
            window.record(20, 10);
        }
        assert_eq!(window.ratio(), 2.0);
        for _ in 0..5 {
            window.record(10, 10);
        }
        assert_eq!(window.len(), ACCURACY_WINDOW_LEN);
        assert_eq!(window.ratio(), 1.0);
    }

    #[test]
    fn zero_estimate_does_not_divide_by_zero() {
        let mut window = PacingWindow::default();
        let ratio = window.record(5, 0);
        assert!(ratio.is_finite());
        assert_eq!(ratio, 5.0);
    }
}
