//! Implementations for the Joystick state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

// Internal
use super::{AxisSpec, DeadzoneFilter, JoystickError, Params};
use crate::arm_state::{ArmState, InputAxis, NUM_AXES};
use crate::sample_src::RawSamples;
use util::{maths::clamp, module::State};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Joystick module state
#[derive(Default)]
pub struct JoystickCtrl {
    pub(crate) params: Params,

    pub(crate) filter: Option<DeadzoneFilter>,

    pub(crate) arm_state: ArmState,

    pub(crate) report: StatusReport,
}

/// Status report for Joystick processing.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug)]
pub struct StatusReport {
    /// Filtered delta of each channel this cycle.
    pub deltas: [f64; NUM_AXES],

    /// True if the axis is sitting on one of its bounds.
    pub pos_limited: [bool; NUM_AXES],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for JoystickCtrl {
    type InitData = Params;
    type InitError = JoystickError;

    type InputData = RawSamples;
    type OutputData = ArmState;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the Joystick module.
    ///
    /// The arm state is reset to the neutral position, clamped into the axis
    /// bounds.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        init_data.validate()?;

        self.filter = Some(DeadzoneFilter::new(init_data.deadzone_percent));

        let mut arm_state = ArmState::from_array(init_data.neutral_pos);
        for axis in InputAxis::ALL.iter() {
            let spec = init_data.axis_spec(*axis);
            let field = arm_state.axis_mut(*axis);
            *field = clamp(field, &spec.min, &spec.max);
        }

        debug!("Joystick neutral arm state: {:?}", arm_state);

        self.arm_state = arm_state;
        self.params = init_data;
        self.report = StatusReport::default();

        Ok(())
    }

    /// Filter the samples of this cycle and integrate them into the arm
    /// state.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report
        self.report = StatusReport::default();

        let filter = match self.filter {
            Some(f) => f,
            None => DeadzoneFilter::new(self.params.deadzone_percent),
        };

        for axis in InputAxis::ALL.iter() {
            let i = axis.channel();
            let delta = filter.apply(input_data[i]);
            let spec = self.params.axis_spec(*axis);

            integrate(
                &mut self.arm_state,
                *axis,
                delta,
                self.params.sensitivity,
                &spec,
            );

            let value = self.arm_state.get(*axis);
            self.report.deltas[i] = delta;
            self.report.pos_limited[i] = value <= spec.min || value >= spec.max;
        }

        Ok((self.arm_state, self.report))
    }
}

impl JoystickCtrl {
    /// Get the current arm state.
    pub fn arm_state(&self) -> &ArmState {
        &self.arm_state
    }

    /// Get the parameters the module was initialised with.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Integrate a filtered delta into the arm state field driven by `axis`.
///
/// The field moves by `delta * sensitivity * gain` and is then clamped to the
/// axis bounds. There is no decay, a zero delta leaves the field untouched.
pub fn integrate(
    state: &mut ArmState,
    axis: InputAxis,
    delta: f64,
    sensitivity: f64,
    spec: &AxisSpec,
) {
    let field = state.axis_mut(axis);
    *field += delta * sensitivity * spec.gain;
    *field = clamp(field, &spec.min, &spec.max);
}
