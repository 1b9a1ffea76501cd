//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

// Internal
use super::{ArmCtrlError, IkGeometry, JointAngles, Params, NUM_IK_JOINTS};
use crate::arm_state::ArmState;
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state
#[derive(Default)]
pub struct ArmCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    /// Joint angles currently in effect.
    pub(crate) angles: JointAngles,

    /// Geometry of the last accepted solution.
    pub(crate) last_geometry: Option<IkGeometry>,

    pub(crate) num_rejected: u64,
}

/// Outcome of solving a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The target was reachable and the joint angles were updated.
    Accepted,

    /// The target is further than the arm can reach, the previous joint
    /// angles are kept.
    OutOfWorkspace,
}

/// Status report for ArmCtrl processing.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct StatusReport {
    /// Outcome of this cycle's solve.
    pub status: SolveStatus,

    /// Base, shoulder, elbow and wrist flags raised if the angle of the last
    /// accepted solution was clamped into the joint limits.
    pub clamped: [bool; NUM_IK_JOINTS],

    /// Number of targets rejected since initialisation.
    pub num_rejected: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SolveStatus {
    fn default() -> Self {
        SolveStatus::Accepted
    }
}

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            status: SolveStatus::default(),
            clamped: [false; NUM_IK_JOINTS],
            num_rejected: 0,
        }
    }
}

impl State for ArmCtrl {
    type InitData = Params;
    type InitError = ArmCtrlError;

    type InputData = ArmState;
    type OutputData = JointAngles;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the ArmCtrl module.
    ///
    /// The joint angles start at the neutral angles from the parameters.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        init_data.validate()?;

        self.angles = init_data.neutral_angles;
        self.params = init_data;
        self.report = StatusReport::default();
        self.last_geometry = None;
        self.num_rejected = 0;

        Ok(())
    }

    /// Perform cyclic processing of Arm Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        self.report.status = self.calc_inverse_kinematics(input_data);
        self.report.num_rejected = self.num_rejected;

        Ok((self.angles, self.report))
    }
}

impl ArmCtrl {
    /// Joint angles currently in effect.
    pub fn angles(&self) -> &JointAngles {
        &self.angles
    }

    /// Geometry of the last accepted solution, if there has been one.
    pub fn last_geometry(&self) -> Option<&IkGeometry> {
        self.last_geometry.as_ref()
    }

    /// Get the parameters the module was initialised with.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn init_ctrl() -> ArmCtrl {
        let mut ctrl = ArmCtrl::default();
        ctrl.init(Params::default()).unwrap();
        ctrl
    }

    fn proc(ctrl: &mut ArmCtrl, state: ArmState) -> (JointAngles, StatusReport) {
        match ctrl.proc(&state) {
            Ok(r) => r,
            Err(e) => match e {},
        }
    }

    #[test]
    fn test_init() {
        let ctrl = init_ctrl();
        assert_eq!(*ctrl.angles(), Params::default().neutral_angles);
        assert!(ctrl.last_geometry().is_none());

        let mut ctrl = ArmCtrl::default();
        let params = Params {
            arm_length_cm: 0.0,
            ..Params::default()
        };
        assert!(matches!(
            ctrl.init(params),
            Err(ArmCtrlError::InvalidLinkLength(_, _))
        ));
    }

    #[test]
    fn test_unreachable_keeps_previous_angles() {
        let mut ctrl = init_ctrl();

        let (accepted, report) = proc(&mut ctrl, ArmState::from_array([4.0, 10.0, 8.0, 30.0]));
        assert_eq!(report.status, SolveStatus::Accepted);
        assert_eq!(accepted.claw_deg, 30.0);

        // Out of reach, nothing changes, the claw included
        let (held, report) = proc(&mut ctrl, ArmState::from_array([0.0, 0.0, 25.0, 60.0]));
        assert_eq!(report.status, SolveStatus::OutOfWorkspace);
        assert_eq!(report.num_rejected, 1);
        assert_eq!(held, accepted);
        assert_eq!(*ctrl.angles(), accepted);

        let (_, report) = proc(&mut ctrl, ArmState::from_array([24.0, 24.0, 24.0, 60.0]));
        assert_eq!(report.status, SolveStatus::OutOfWorkspace);
        assert_eq!(report.num_rejected, 2);

        // Back in reach
        let (moved, report) = proc(&mut ctrl, ArmState::from_array([0.0, 12.0, 12.0, 60.0]));
        assert_eq!(report.status, SolveStatus::Accepted);
        assert_eq!(report.num_rejected, 2);
        assert_ne!(moved, accepted);
        assert_eq!(moved.claw_deg, 60.0);
    }

    #[test]
    fn test_unreachable_from_start_keeps_neutral() {
        let mut ctrl = init_ctrl();

        let (angles, report) = proc(&mut ctrl, ArmState::from_array([0.0, 0.0, 25.0, 0.0]));
        assert_eq!(report.status, SolveStatus::OutOfWorkspace);
        assert_eq!(angles, Params::default().neutral_angles);
    }

    #[test]
    fn test_clamped_report() {
        let mut ctrl = init_ctrl();

        let (_, report) = proc(&mut ctrl, ArmState::from_array([0.0, 0.0, 24.0, 0.0]));
        assert_eq!(report.clamped, [false, false, false, true]);
        assert_eq!(ctrl.last_geometry().map(|g| g.reach_cm), Some(24.0));

        let (_, report) = proc(&mut ctrl, ArmState::from_array([0.0, 12.0, 12.0, 0.0]));
        assert_eq!(report.status, SolveStatus::Accepted);
        assert_eq!(report.clamped[0], false);
        assert_eq!(report.clamped[1], false);
        assert_eq!(report.clamped[2], false);
    }
}
