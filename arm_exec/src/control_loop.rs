//! # Control loop
//!
//! One tick of the control loop is a full pass through the pipeline:
//!
//! ```text
//! samples -> joystick (filter + integrate) -> arm_ctrl (inverse kinematics)
//!         -> servo_ctrl (pulse ticks) -> actuator port
//! ```
//!
//! The loop owns the arm state and the joint angles, nothing else mutates
//! them. Ticks are run to completion and never overlap.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{debug, info};
use serde::Serialize;

// Internal
use crate::{
    arm_ctrl::{self, ArmCtrl, ArmCtrlError, JointAngles, SolveStatus},
    arm_state::ArmState,
    joystick::{self, JoystickCtrl, JoystickError},
    sample_src::RawSamples,
    servo_ctrl::{self, ActuatorPort, ServoCtrl, ServoError},
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    session,
};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur while setting up or running the control loop.
#[derive(Debug, thiserror::Error)]
pub enum ControlLoopError {
    #[error("Joystick error: {0}")]
    Joystick(#[from] JoystickError),

    #[error("ArmCtrl error: {0}")]
    ArmCtrl(#[from] ArmCtrlError),

    #[error("Servo error: {0}")]
    Servo(#[from] ServoError),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The control loop context.
pub struct ControlLoop {
    joystick: JoystickCtrl,

    arm_ctrl: ArmCtrl,

    servo_ctrl: ServoCtrl,

    num_ticks: u64,

    last_tick: Option<TickReport>,

    archiver: Archiver,
}

/// Everything produced by one tick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TickReport {
    /// Index of the tick, starting at 0.
    pub tick: u64,

    /// Arm target after integrating this tick's samples.
    pub arm_state: ArmState,

    /// Joint angles in effect after this tick.
    pub angles: JointAngles,

    pub joystick: joystick::StatusReport,

    pub arm_ctrl: arm_ctrl::StatusReport,

    /// Number of actuator commands sent.
    pub num_cmds: usize,
}

/// Flat archive record of a tick.
#[derive(Serialize)]
struct TickRecord {
    time_s: f64,
    tick: u64,
    x_cm: f64,
    y_cm: f64,
    z_cm: f64,
    claw_target_deg: f64,
    base_deg: f64,
    shoulder_deg: f64,
    elbow_deg: f64,
    wrist_deg: f64,
    claw_deg: f64,
    accepted: bool,
    num_rejected: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ControlLoop {
    /// Initialise every module of the loop.
    ///
    /// The arm state starts at the joystick's neutral position and the joint
    /// angles at arm control's neutral angles.
    pub fn new(
        joystick_params: joystick::Params,
        arm_ctrl_params: arm_ctrl::Params,
        servo_params: servo_ctrl::Params,
    ) -> Result<Self, ControlLoopError> {
        let mut joystick = JoystickCtrl::default();
        joystick.init(joystick_params)?;
        info!("Joystick init complete");

        let mut arm_ctrl = ArmCtrl::default();
        arm_ctrl.init(arm_ctrl_params)?;
        info!("ArmCtrl init complete");

        let servo_ctrl = ServoCtrl::new(servo_params)?;
        info!("ServoCtrl init complete");

        Ok(Self {
            joystick,
            arm_ctrl,
            servo_ctrl,
            num_ticks: 0,
            last_tick: None,
            archiver: Archiver::default(),
        })
    }

    /// Archive every tick with the given archiver.
    pub fn set_archiver(&mut self, archiver: Archiver) {
        self.archiver = archiver;
    }

    /// Drive the neutral pose onto every servo.
    ///
    /// Returns the number of commands sent.
    pub fn startup<P: ActuatorPort>(&mut self, port: &mut P) -> Result<usize, ControlLoopError> {
        let angles = *self.arm_ctrl.angles();

        info!("Driving neutral pose {:?}", angles);

        Ok(self.servo_ctrl.drive_startup(port, &angles)?)
    }

    /// Run one tick of the loop with the given samples.
    pub fn tick<P: ActuatorPort>(
        &mut self,
        samples: &RawSamples,
        port: &mut P,
    ) -> Result<TickReport, ControlLoopError> {
        // ---- JOYSTICK ----

        let (arm_state, joystick_report) = match self.joystick.proc(samples) {
            Ok(r) => r,
            Err(e) => match e {},
        };

        // ---- ARM CONTROL ----

        let (angles, arm_ctrl_report) = match self.arm_ctrl.proc(&arm_state) {
            Ok(r) => r,
            Err(e) => match e {},
        };

        if arm_ctrl_report.status == SolveStatus::OutOfWorkspace
            && self
                .last_tick
                .map_or(true, |t| t.arm_ctrl.status == SolveStatus::Accepted)
        {
            debug!("Arm target left the workspace at tick {}", self.num_ticks);
        }

        // ---- SERVOS ----

        let num_cmds = self.servo_ctrl.drive_angles(port, &angles)?;

        let report = TickReport {
            tick: self.num_ticks,
            arm_state,
            angles,
            joystick: joystick_report,
            arm_ctrl: arm_ctrl_report,
            num_cmds,
        };

        self.last_tick = Some(report);
        self.num_ticks += 1;

        Ok(report)
    }

    /// Number of ticks run so far.
    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    /// Current arm target.
    pub fn arm_state(&self) -> &ArmState {
        self.joystick.arm_state()
    }

    /// Joint angles currently in effect.
    pub fn angles(&self) -> &JointAngles {
        self.arm_ctrl.angles()
    }

    /// Report of the last tick, if one has been run.
    pub fn last_tick(&self) -> Option<&TickReport> {
        self.last_tick.as_ref()
    }

    /// The servo controller, to inspect what was last commanded.
    pub fn servo_ctrl(&self) -> &ServoCtrl {
        &self.servo_ctrl
    }
}

impl Archived for ControlLoop {
    /// Write the last tick to the archive, does nothing if archiving is
    /// disabled.
    fn write(&mut self) -> Result<(), ArchiveError> {
        if !self.archiver.is_open() {
            return Ok(());
        }

        match self.last_tick {
            Some(ref t) => self.archiver.serialise(TickRecord::from_report(t)),
            None => Ok(()),
        }
    }
}

impl TickRecord {
    fn from_report(t: &TickReport) -> Self {
        Self {
            time_s: session::get_elapsed_seconds(),
            tick: t.tick,
            x_cm: t.arm_state.x_cm,
            y_cm: t.arm_state.y_cm,
            z_cm: t.arm_state.z_cm,
            claw_target_deg: t.arm_state.claw_deg,
            base_deg: t.angles.base_deg,
            shoulder_deg: t.angles.shoulder_deg,
            elbow_deg: t.angles.elbow_deg,
            wrist_deg: t.angles.wrist_deg,
            claw_deg: t.angles.claw_deg,
            accepted: t.arm_ctrl.status == SolveStatus::Accepted,
            num_rejected: t.arm_ctrl.num_rejected,
        }
    }
}
