//! Angle to pulse width conversion

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::ServoError;
use util::maths::clamp;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Full travel of a servo.
///
/// Units: degrees
pub const SERVO_TRAVEL_DEG: f64 = 180.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Pulse width limits of the servos and the resolution of the timer
/// generating the pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseSpec {
    /// Pulse width at 0 degrees.
    ///
    /// Units: microseconds
    pub min_pulse_us: u32,

    /// Pulse width at 180 degrees.
    ///
    /// Units: microseconds
    pub max_pulse_us: u32,

    /// Duration of one timer tick.
    ///
    /// Units: microseconds
    pub tick_resolution_us: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for PulseSpec {
    fn default() -> Self {
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
            tick_resolution_us: 20,
        }
    }
}

impl PulseSpec {
    /// Check the pulse widths and tick resolution can be used for conversions.
    pub fn validate(&self) -> Result<(), ServoError> {
        if self.tick_resolution_us == 0 {
            return Err(ServoError::ZeroTickResolution);
        }

        if self.min_pulse_us > self.max_pulse_us {
            return Err(ServoError::InvertedPulseWidths(
                self.min_pulse_us,
                self.max_pulse_us,
            ));
        }

        Ok(())
    }

    /// Convert an angle into a pulse width.
    ///
    /// The angle is clamped into `[0, 180]` and the width is truncated to a
    /// whole number of microseconds. The fraction of travel is computed before
    /// scaling by the pulse range.
    ///
    /// Units: microseconds
    pub fn to_pulse_us(&self, angle_deg: f64) -> u32 {
        let angle_deg = clamp(&angle_deg, &0.0, &SERVO_TRAVEL_DEG);
        let range_us = self.max_pulse_us.saturating_sub(self.min_pulse_us) as f64;

        (self.min_pulse_us as f64 + (angle_deg / SERVO_TRAVEL_DEG) * range_us) as u32
    }

    /// Convert an angle into a number of timer ticks.
    ///
    /// Both the pulse width and the tick count are truncated, never rounded.
    pub fn to_ticks(&self, angle_deg: f64) -> u32 {
        // A zero resolution is rejected by `validate`, avoid the panic anyway
        self.to_pulse_us(angle_deg) / self.tick_resolution_us.max(1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_end_stops() {
        let spec = PulseSpec::default();

        assert_eq!(spec.to_ticks(0.0), 500 / 20);
        assert_eq!(spec.to_ticks(180.0), 2500 / 20);
        assert_eq!(spec.to_pulse_us(0.0), 500);
        assert_eq!(spec.to_pulse_us(180.0), 2500);

        // Out of range angles are clamped
        assert_eq!(spec.to_ticks(-45.0), 25);
        assert_eq!(spec.to_ticks(400.0), 125);
        assert_eq!(spec.to_ticks(f64::INFINITY), 125);
    }

    #[test]
    fn test_truncation() {
        let spec = PulseSpec::default();

        // 500 + 1/180 * 2000 = 511.11 us -> 511 us -> 25.55 ticks -> 25
        assert_eq!(spec.to_pulse_us(1.0), 511);
        assert_eq!(spec.to_ticks(1.0), 25);

        // 500 + 1.8/180 * 2000 = 520 us -> 26 ticks
        assert_eq!(spec.to_ticks(1.8), 26);

        // 1519.9 us is still 75 ticks
        assert_eq!(spec.to_ticks(91.79), 75);
    }

    #[test]
    fn test_odd_resolution() {
        let spec = PulseSpec {
            min_pulse_us: 1000,
            max_pulse_us: 2000,
            tick_resolution_us: 7,
        };
        assert!(spec.validate().is_ok());

        assert_eq!(spec.to_ticks(0.0), 1000 / 7);
        assert_eq!(spec.to_ticks(180.0), 2000 / 7);
        assert_eq!(spec.to_ticks(90.0), 1500 / 7);
    }

    #[test]
    fn test_monotonic() {
        let spec = PulseSpec::default();
        let mut prev = spec.to_ticks(0.0);

        for i in 1..=1800 {
            let ticks = spec.to_ticks(i as f64 / 10.0);
            assert!(ticks >= prev);
            prev = ticks;
        }
    }

    #[test]
    fn test_validate() {
        let spec = PulseSpec {
            tick_resolution_us: 0,
            ..PulseSpec::default()
        };
        assert!(matches!(spec.validate(), Err(ServoError::ZeroTickResolution)));
        assert_eq!(spec.to_ticks(90.0), 1500);

        let spec = PulseSpec {
            min_pulse_us: 3000,
            ..PulseSpec::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(ServoError::InvertedPulseWidths(3000, 2500))
        ));
    }
}
