//! Deadzone filter for raw stick samples

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::MAX_RAW_SAMPLE;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A symmetric deadzone about the centre of the sample range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadzoneFilter {
    /// Samples strictly below this value produce a negative delta.
    pub lower_dz: f64,

    /// Samples strictly above this value produce a positive delta.
    pub upper_dz: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DeadzoneFilter {
    /// Build the deadzone bounds for a deadzone covering `deadzone_percent` of
    /// the full sample range.
    ///
    /// The percentage is clamped to `[0, 100]`.
    pub fn new(deadzone_percent: f64) -> Self {
        let range = MAX_RAW_SAMPLE as f64;
        let mid = range / 2.0;
        let half_width = (range * deadzone_percent.max(0.0).min(100.0) / 100.0) / 2.0;

        Self {
            lower_dz: mid - half_width,
            upper_dz: mid + half_width,
        }
    }

    /// Convert a raw sample into a delta in `[-1, 1]`.
    ///
    /// The delta ramps linearly from -1 at the bottom rail to 0 at the lower
    /// deadzone bound, is 0 inside the deadzone, and ramps from 0 at the upper
    /// bound to 1 at the top rail. Samples above the top rail are treated as
    /// the rail.
    pub fn apply(&self, raw_sample: u16) -> f64 {
        let v = raw_sample.min(MAX_RAW_SAMPLE) as f64;

        if v < self.lower_dz {
            -1.0 + v / self.lower_dz
        } else if v > self.upper_dz {
            (v - self.upper_dz) / (MAX_RAW_SAMPLE as f64 - self.upper_dz)
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Filter a single raw sample with the given deadzone.
pub fn filter(raw_sample: u16, deadzone_percent: f64) -> f64 {
    DeadzoneFilter::new(deadzone_percent).apply(raw_sample)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bounds() {
        let dz = DeadzoneFilter::new(30.0);
        assert!((dz.lower_dz - 1433.25).abs() < 1e-9);
        assert!((dz.upper_dz - 2661.75).abs() < 1e-9);

        // Out of range percentages are clamped
        assert_eq!(DeadzoneFilter::new(-10.0), DeadzoneFilter::new(0.0));
        assert_eq!(DeadzoneFilter::new(150.0), DeadzoneFilter::new(100.0));
    }

    #[test]
    fn test_rails() {
        assert_eq!(filter(0, 30.0), -1.0);
        assert_eq!(filter(MAX_RAW_SAMPLE, 30.0), 1.0);
        assert_eq!(filter(u16::MAX, 30.0), 1.0);

        assert_eq!(filter(0, 0.0), -1.0);
        assert_eq!(filter(MAX_RAW_SAMPLE, 0.0), 1.0);
    }

    #[test]
    fn test_deadzone_is_zero() {
        let dz = DeadzoneFilter::new(30.0);

        for v in (dz.lower_dz.ceil() as u16)..=(dz.upper_dz.floor() as u16) {
            assert_eq!(dz.apply(v), 0.0, "sample {} should be in the deadzone", v);
        }

        // Just outside the deadzone the delta is small but not zero
        assert!(dz.apply(dz.lower_dz.floor() as u16) < 0.0);
        assert!(dz.apply(dz.upper_dz.ceil() as u16) > 0.0);
    }

    #[test]
    fn test_monotonic() {
        for &pct in &[0.0, 10.0, 30.0, 75.0] {
            let dz = DeadzoneFilter::new(pct);
            let mut prev = dz.apply(0);

            for v in 1..=MAX_RAW_SAMPLE {
                let delta = dz.apply(v);
                assert!(delta >= prev, "filter decreased at {} ({}%)", v, pct);
                assert!((-1.0..=1.0).contains(&delta));
                prev = delta;
            }
        }
    }

    #[test]
    fn test_full_deadzone() {
        let dz = DeadzoneFilter::new(100.0);
        assert_eq!(dz.apply(0), 0.0);
        assert_eq!(dz.apply(2048), 0.0);
        assert_eq!(dz.apply(MAX_RAW_SAMPLE), 0.0);
    }

    #[test]
    fn test_ramp() {
        let dz = DeadzoneFilter::new(30.0);

        // Half way between the rail and the bound
        let v = (dz.lower_dz / 2.0) as u16;
        assert!((dz.apply(v) - (-1.0 + v as f64 / dz.lower_dz)).abs() < 1e-12);
        assert!((dz.apply(v) + 0.5).abs() < 1e-3);
    }
}
