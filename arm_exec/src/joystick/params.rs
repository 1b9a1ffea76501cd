//! Parameters structure for the Joystick module

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::JoystickError;
use crate::arm_state::{InputAxis, NUM_AXES};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the Joystick module.
///
/// Axis arrays are indexed by channel: x, y, z, claw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // ---- FILTERING ----
    /// Width of the deadzone around the centre of the stick, as a percentage
    /// of the full sample range.
    ///
    /// Units: percent
    pub deadzone_percent: f64,

    /// Distance moved per cycle at full stick deflection.
    ///
    /// Units: centimeters/cycle
    pub sensitivity: f64,

    /// Per axis multiplier applied on top of `sensitivity`. The claw is ten
    /// times more sensitive than the position axes.
    pub axis_gain: [f64; NUM_AXES],

    // ---- BOUNDS ----
    /// Minimum value of each axis.
    ///
    /// Units: centimeters (x, y, z), degrees (claw)
    pub min_pos: [f64; NUM_AXES],

    /// Maximum value of each axis.
    ///
    /// Units: centimeters (x, y, z), degrees (claw)
    pub max_pos: [f64; NUM_AXES],

    // ---- INITIALISATION ----
    /// Value of each axis at startup.
    ///
    /// Units: centimeters (x, y, z), degrees (claw)
    pub neutral_pos: [f64; NUM_AXES],
}

/// The integration limits of a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub gain: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            deadzone_percent: 30.0,
            sensitivity: 0.001,
            axis_gain: [1.0, 1.0, 1.0, 10.0],
            min_pos: [-24.0, 0.0, 0.0, 0.0],
            max_pos: [24.0, 24.0, 24.0, 90.0],
            neutral_pos: [0.0, 12.0, 12.0, 0.0],
        }
    }
}

impl Params {
    /// Get the limits for the given axis.
    pub fn axis_spec(&self, axis: InputAxis) -> AxisSpec {
        let i = axis.channel();

        AxisSpec {
            min: self.min_pos[i],
            max: self.max_pos[i],
            gain: self.axis_gain[i],
        }
    }

    /// Check that the parameters are usable.
    pub fn validate(&self) -> Result<(), JoystickError> {
        if !(0.0..=100.0).contains(&self.deadzone_percent) {
            return Err(JoystickError::InvalidDeadzone(self.deadzone_percent));
        }

        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(JoystickError::InvalidSensitivity(self.sensitivity));
        }

        for axis in InputAxis::ALL.iter() {
            let spec = self.axis_spec(*axis);
            if spec.min > spec.max {
                return Err(JoystickError::InvertedBounds(*axis, spec.min, spec.max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let p = Params::default();
        assert!(p.validate().is_ok());
        assert_eq!(
            p.axis_spec(InputAxis::Claw),
            AxisSpec {
                min: 0.0,
                max: 90.0,
                gain: 10.0
            }
        );
    }

    #[test]
    fn test_validate() {
        let mut p = Params::default();
        p.deadzone_percent = 101.0;
        assert!(matches!(p.validate(), Err(JoystickError::InvalidDeadzone(_))));

        let mut p = Params::default();
        p.sensitivity = 0.0;
        assert!(matches!(p.validate(), Err(JoystickError::InvalidSensitivity(_))));

        let mut p = Params::default();
        p.min_pos[1] = 30.0;
        assert!(matches!(
            p.validate(),
            Err(JoystickError::InvertedBounds(InputAxis::Y, _, _))
        ));
    }

    #[test]
    fn test_partial_toml() {
        // Missing fields fall back to the defaults
        let p: Params = util::params::from_str("deadzone_percent = 20.0").unwrap();
        assert_eq!(p.deadzone_percent, 20.0);
        assert_eq!(p.sensitivity, 0.001);
        assert_eq!(p.max_pos, [24.0, 24.0, 24.0, 90.0]);
    }
}
