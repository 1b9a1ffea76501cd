//! # Arm State
//!
//! The arm state is the persistent target of the arm, the position of the
//! head of the arm relative to the base plus the angle of the claw. It is
//! owned by the control loop, mutated once per cycle by the joystick module
//! and read by arm control.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of input axes, and so the number of fields in the arm state.
pub const NUM_AXES: usize = 4;

/// Field accessors for each input axis, indexed by `InputAxis as usize`.
const AXIS_FIELDS: [fn(&mut ArmState) -> &mut f64; NUM_AXES] =
    [x_cm_mut, y_cm_mut, z_cm_mut, claw_deg_mut];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An input axis of the joystick. The discriminant is the sample channel
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAxis {
    X = 0,
    Y = 1,
    Z = 2,
    Claw = 3,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Target of the arm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmState {
    /// Position of the arm head along the base's X axis.
    ///
    /// Units: centimeters
    pub x_cm: f64,

    /// Position of the arm head along the base's Y axis.
    ///
    /// Units: centimeters
    pub y_cm: f64,

    /// Height of the arm head above the base plane.
    ///
    /// Units: centimeters
    pub z_cm: f64,

    /// Angle of the claw.
    ///
    /// Units: degrees
    pub claw_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl InputAxis {
    /// All axes in channel order.
    pub const ALL: [InputAxis; NUM_AXES] =
        [InputAxis::X, InputAxis::Y, InputAxis::Z, InputAxis::Claw];

    /// Get the axis read from the given sample channel, or `None` if there is
    /// no such channel.
    pub fn from_channel(channel: usize) -> Option<Self> {
        Self::ALL.get(channel).copied()
    }

    /// The sample channel index of this axis.
    pub fn channel(self) -> usize {
        self as usize
    }
}

impl ArmState {
    /// Build a state from the values of each axis in channel order.
    pub fn from_array(values: [f64; NUM_AXES]) -> Self {
        Self {
            x_cm: values[0],
            y_cm: values[1],
            z_cm: values[2],
            claw_deg: values[3],
        }
    }

    /// Get the value of an axis.
    pub fn get(&self, axis: InputAxis) -> f64 {
        let mut copy = *self;
        *copy.axis_mut(axis)
    }

    /// Get a mutable reference to the field driven by the given axis.
    pub fn axis_mut(&mut self, axis: InputAxis) -> &mut f64 {
        AXIS_FIELDS[axis.channel()](self)
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn x_cm_mut(s: &mut ArmState) -> &mut f64 {
    &mut s.x_cm
}

fn y_cm_mut(s: &mut ArmState) -> &mut f64 {
    &mut s.y_cm
}

fn z_cm_mut(s: &mut ArmState) -> &mut f64 {
    &mut s.z_cm
}

fn claw_deg_mut(s: &mut ArmState) -> &mut f64 {
    &mut s.claw_deg
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_axis_table() {
        let mut state = ArmState::from_array([1.0, 2.0, 3.0, 4.0]);

        assert_eq!(state.get(InputAxis::X), 1.0);
        assert_eq!(state.get(InputAxis::Y), 2.0);
        assert_eq!(state.get(InputAxis::Z), 3.0);
        assert_eq!(state.get(InputAxis::Claw), 4.0);

        *state.axis_mut(InputAxis::Z) = 10.0;
        assert_eq!(state.z_cm, 10.0);
        assert_eq!(state.x_cm, 1.0);
    }

    #[test]
    fn test_from_channel() {
        for (i, axis) in InputAxis::ALL.iter().enumerate() {
            assert_eq!(InputAxis::from_channel(i), Some(*axis));
            assert_eq!(axis.channel(), i);
        }
        assert_eq!(InputAxis::from_channel(NUM_AXES), None);
    }
}
