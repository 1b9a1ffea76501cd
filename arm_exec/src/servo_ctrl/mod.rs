//! # Servo Controller Module
//!
//! This module converts joint angles into pulse widths and drives them onto
//! actuator channels through an [`ActuatorPort`], which abstracts over the
//! hardware that actually generates the PWM signal.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// [`ActuatorPort`] implementation which only logs the commands.
mod log_port;

/// Angle to pulse width conversion.
mod pulse;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::{Deserialize, Serialize};

use crate::arm_ctrl::JointAngles;

pub use log_port::LogPort;
pub use pulse::PulseSpec;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of servos on the arm.
pub const NUM_SERVOS: usize = 6;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for the hardware driving the servos.
pub trait ActuatorPort {
    /// Set the pulse width of a channel, in timer ticks.
    ///
    /// ## Arguments
    /// - `channel` - The channel to drive
    /// - `ticks` - The high time of the pulse as a number of timer ticks
    fn set_pulse_ticks(&mut self, channel: u8, ticks: u32) -> Result<(), ServoError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A servo of the arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServoId {
    Base = 0,
    Shoulder = 1,
    Elbow = 2,
    WristRotate = 3,
    Wrist = 4,
    Claw = 5,
}

#[derive(thiserror::Error, Debug)]
pub enum ServoError {
    #[error("Channel {0} is not available on this port")]
    InvalidChannel(u8),

    #[error("The actuator port failed: {0}")]
    PortFault(String),

    #[error("Tick resolution must be non-zero")]
    ZeroTickResolution,

    #[error("Minimum pulse width ({0} us) is greater than the maximum ({1} us)")]
    InvertedPulseWidths(u32, u32),

    #[error("Servos {0:?} and {1:?} share channel {2}")]
    SharedChannel(ServoId, ServoId, u8),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the servo controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Pulse width limits and timer resolution, shared by all servos.
    pub pulse: PulseSpec,

    /// Actuator channel of each servo, indexed by `ServoId as usize`.
    pub channels: [u8; NUM_SERVOS],

    /// Angle of the wrist rotation servo, which is only set at startup.
    ///
    /// Units: degrees
    pub wrist_rotate_deg: f64,
}

/// Servo controller, maps joint angles onto actuator channels.
#[derive(Debug, Default)]
pub struct ServoCtrl {
    params: Params,

    /// Last tick count commanded on each servo.
    last_ticks: [Option<u32>; NUM_SERVOS],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ServoId {
    /// All servos in channel order.
    pub const ALL: [ServoId; NUM_SERVOS] = [
        ServoId::Base,
        ServoId::Shoulder,
        ServoId::Elbow,
        ServoId::WristRotate,
        ServoId::Wrist,
        ServoId::Claw,
    ];
}

impl Default for Params {
    fn default() -> Self {
        Self {
            pulse: PulseSpec::default(),
            channels: [0, 1, 2, 3, 4, 5],
            wrist_rotate_deg: 90.0,
        }
    }
}

impl Params {
    /// Check that the parameters are usable.
    pub fn validate(&self) -> Result<(), ServoError> {
        self.pulse.validate()?;

        for (i, a) in ServoId::ALL.iter().enumerate() {
            for b in ServoId::ALL.iter().skip(i + 1) {
                let ch = self.channels[*a as usize];
                if ch == self.channels[*b as usize] {
                    return Err(ServoError::SharedChannel(*a, *b, ch));
                }
            }
        }

        Ok(())
    }
}

impl ServoCtrl {
    /// Create a new servo controller, checking the parameters.
    pub fn new(params: Params) -> Result<Self, ServoError> {
        params.validate()?;

        Ok(Self {
            params,
            last_ticks: [None; NUM_SERVOS],
        })
    }

    /// Drive the startup pose, every servo including the wrist rotation.
    pub fn drive_startup<P: ActuatorPort>(
        &mut self,
        port: &mut P,
        angles: &JointAngles,
    ) -> Result<usize, ServoError> {
        let wrist_rotate_deg = self.params.wrist_rotate_deg;

        // Wrist and claw are set before the arm stands up
        self.drive(port, ServoId::WristRotate, wrist_rotate_deg)?;
        self.drive(port, ServoId::Wrist, angles.wrist_deg)?;
        self.drive(port, ServoId::Claw, angles.claw_deg)?;
        self.drive(port, ServoId::Base, angles.base_deg)?;
        self.drive(port, ServoId::Shoulder, angles.shoulder_deg)?;
        self.drive(port, ServoId::Elbow, angles.elbow_deg)?;

        Ok(NUM_SERVOS)
    }

    /// Drive the joint angles of one cycle onto the joint servos.
    ///
    /// Returns the number of commands sent.
    pub fn drive_angles<P: ActuatorPort>(
        &mut self,
        port: &mut P,
        angles: &JointAngles,
    ) -> Result<usize, ServoError> {
        let dems = [
            (ServoId::Base, angles.base_deg),
            (ServoId::Shoulder, angles.shoulder_deg),
            (ServoId::Elbow, angles.elbow_deg),
            (ServoId::Wrist, angles.wrist_deg),
            (ServoId::Claw, angles.claw_deg),
        ];

        for (servo, angle_deg) in dems.iter() {
            self.drive(port, *servo, *angle_deg)?;
        }

        Ok(dems.len())
    }

    /// Last tick count commanded on the given servo.
    pub fn last_ticks(&self, servo: ServoId) -> Option<u32> {
        self.last_ticks[servo as usize]
    }

    /// Actuator channel of the given servo.
    pub fn channel(&self, servo: ServoId) -> u8 {
        self.params.channels[servo as usize]
    }

    fn drive<P: ActuatorPort>(
        &mut self,
        port: &mut P,
        servo: ServoId,
        angle_deg: f64,
    ) -> Result<(), ServoError> {
        let ticks = self.params.pulse.to_ticks(angle_deg);
        let channel = self.channel(servo);

        trace!("{:?} ({}): {:.3} deg -> {} ticks", servo, channel, angle_deg, ticks);

        port.set_pulse_ticks(channel, ticks)?;
        self.last_ticks[servo as usize] = Some(ticks);

        Ok(())
    }
}
