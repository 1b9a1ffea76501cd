//! Joystick module
//!
//! Converts the raw analog samples of the stick into a persistent arm target.
//! Each sample is passed through a deadzone filter producing a delta in
//! `[-1, 1]`, which is then integrated into the matching field of the
//! [`ArmState`](crate::arm_state::ArmState). A sustained deflection moves the
//! target continuously, a centred stick holds it where it is.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod filter;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use filter::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Largest value a raw sample can take (12 bit ADC).
pub const MAX_RAW_SAMPLE: u16 = 4095;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during Joystick initialisation.
#[derive(Debug, thiserror::Error)]
pub enum JoystickError {
    #[error("Deadzone must be between 0 and 100 %, found {0}")]
    InvalidDeadzone(f64),

    #[error("Sensitivity must be finite and positive, found {0}")]
    InvalidSensitivity(f64),

    #[error("Bounds of the {0:?} axis are inverted ({1} > {2})")]
    InvertedBounds(crate::arm_state::InputAxis, f64, f64),
}
