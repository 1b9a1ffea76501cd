//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{ArmCtrlError, Joint, JointAngles, NUM_IK_JOINTS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // ---- GEOMETRY ----
    /// The length of the forearm, the link between the shoulder and the
    /// elbow.
    ///
    /// Units: centimeters
    pub forearm_length_cm: f64,

    /// The length of the arm, the link between the elbow and the wrist.
    ///
    /// Units: centimeters
    pub arm_length_cm: f64,

    /// Mechanical zero offset of the elbow servo.
    ///
    /// Units: degrees
    pub elbow_offset_deg: f64,

    // ---- CAPABILITIES ----
    /// Minimum angle of the base, shoulder, elbow and wrist.
    ///
    /// Units: degrees
    pub min_joint_deg: [f64; NUM_IK_JOINTS],

    /// Maximum angle of the base, shoulder, elbow and wrist.
    ///
    /// Units: degrees
    pub max_joint_deg: [f64; NUM_IK_JOINTS],

    /// Maximum opening of the claw.
    ///
    /// Units: degrees
    pub max_claw_deg: f64,

    /// Default SAFE angles of the joints, commanded at startup.
    pub neutral_angles: JointAngles,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            forearm_length_cm: 12.0,
            arm_length_cm: 12.0,
            elbow_offset_deg: 135.0,
            min_joint_deg: [0.0; NUM_IK_JOINTS],
            max_joint_deg: [180.0; NUM_IK_JOINTS],
            max_claw_deg: 90.0,
            neutral_angles: JointAngles {
                base_deg: 90.0,
                shoulder_deg: 90.0,
                elbow_deg: 45.0,
                wrist_deg: 90.0,
                claw_deg: 0.0,
            },
        }
    }
}

impl Params {
    /// Maximum reach of the arm.
    ///
    /// Units: centimeters
    pub fn max_reach_cm(&self) -> f64 {
        self.forearm_length_cm + self.arm_length_cm
    }

    /// Check that the parameters are usable.
    pub fn validate(&self) -> Result<(), ArmCtrlError> {
        let valid_length = |l: f64| l.is_finite() && l > 0.0;

        if !valid_length(self.forearm_length_cm) || !valid_length(self.arm_length_cm) {
            return Err(ArmCtrlError::InvalidLinkLength(
                self.forearm_length_cm,
                self.arm_length_cm,
            ));
        }

        for (i, joint) in Joint::IK_JOINTS.iter().enumerate() {
            if self.min_joint_deg[i] > self.max_joint_deg[i] {
                return Err(ArmCtrlError::InvertedJointLimits(
                    *joint,
                    self.min_joint_deg[i],
                    self.max_joint_deg[i],
                ));
            }
        }

        if self.max_claw_deg < 0.0 {
            return Err(ArmCtrlError::InvertedJointLimits(
                Joint::Claw,
                0.0,
                self.max_claw_deg,
            ));
        }

        Ok(())
    }
}
