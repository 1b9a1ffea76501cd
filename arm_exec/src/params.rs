//! # Arm Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmExecParams {
    /// Target period of one control cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Time given to the servos to reach the neutral pose before joystick
    /// control is enabled.
    ///
    /// Units: seconds
    pub settle_time_s: f64,

    /// Write a CSV archive of every cycle into the session directory.
    pub archive: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ArmExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            settle_time_s: 5.0,
            archive: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params() {
        // The parameter files in the repository must always parse
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../params/");

        let p: ArmExecParams =
            util::params::load_from_path(format!("{}arm_exec.toml", root)).unwrap();
        assert!(p.cycle_period_s > 0.0);

        let p: crate::joystick::Params =
            util::params::load_from_path(format!("{}joystick.toml", root)).unwrap();
        assert!(p.validate().is_ok());

        let p: crate::arm_ctrl::Params =
            util::params::load_from_path(format!("{}arm_ctrl.toml", root)).unwrap();
        assert!(p.validate().is_ok());

        let p: crate::servo_ctrl::Params =
            util::params::load_from_path(format!("{}servo_ctrl.toml", root)).unwrap();
        assert!(p.validate().is_ok());
    }
}
