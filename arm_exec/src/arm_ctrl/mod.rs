//! Arm control module
//!
//! Converts the Cartesian arm target into joint angles using a closed form
//! inverse kinematics solution of the two link arm.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arm_config;
mod inverse_kinematics;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use arm_config::*;
pub use inverse_kinematics::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of joints whose angle is solved by the inverse kinematics.
pub const NUM_IK_JOINTS: usize = 4;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ArmCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Link lengths must be finite and positive, found forearm {0} cm and arm {1} cm")]
    InvalidLinkLength(f64, f64),

    #[error("Joint limits of the {0:?} are inverted ({1} > {2})")]
    InvertedJointLimits(Joint, f64, f64),
}
