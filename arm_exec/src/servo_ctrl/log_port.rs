//! [`ActuatorPort`] which logs commands instead of driving hardware

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use std::collections::HashMap;

use super::{ActuatorPort, ServoError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Actuator port used when no hardware is attached.
///
/// Every command is logged at trace level and the last tick count of each
/// channel is kept so it can be inspected.
#[derive(Debug, Default)]
pub struct LogPort {
    ticks: HashMap<u8, u32>,

    num_cmds: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LogPort {
    /// Last tick count commanded on the channel.
    pub fn last_ticks(&self, channel: u8) -> Option<u32> {
        self.ticks.get(&channel).copied()
    }

    /// Total number of commands received.
    pub fn num_cmds(&self) -> usize {
        self.num_cmds
    }
}

impl ActuatorPort for LogPort {
    fn set_pulse_ticks(&mut self, channel: u8, ticks: u32) -> Result<(), ServoError> {
        trace!("CH{} <- {} ticks", channel, ticks);

        self.ticks.insert(channel, ticks);
        self.num_cmds += 1;

        Ok(())
    }
}
