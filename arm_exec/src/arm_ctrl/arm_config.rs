//! Joint angle configuration of the arm

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A joint of the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    Base,
    Shoulder,
    Elbow,
    Wrist,
    Claw,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Angles of every joint of the arm.
///
/// Units: degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    /// Yaw of the whole arm about the base.
    pub base_deg: f64,

    /// Angle of the first link above the base plane.
    pub shoulder_deg: f64,

    /// Servo angle of the elbow.
    pub elbow_deg: f64,

    /// Angle of the wrist, chosen to keep the claw level.
    pub wrist_deg: f64,

    /// Opening of the claw.
    pub claw_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Joint {
    /// The joints solved by inverse kinematics, in solution order.
    pub const IK_JOINTS: [Joint; super::NUM_IK_JOINTS] =
        [Joint::Base, Joint::Shoulder, Joint::Elbow, Joint::Wrist];
}

impl JointAngles {
    /// Get the angle of a joint.
    pub fn get(&self, joint: Joint) -> f64 {
        match joint {
            Joint::Base => self.base_deg,
            Joint::Shoulder => self.shoulder_deg,
            Joint::Elbow => self.elbow_deg,
            Joint::Wrist => self.wrist_deg,
            Joint::Claw => self.claw_deg,
        }
    }
}
