//! # Sample sources
//!
//! A sample source provides the four raw analog samples of the stick on each
//! cycle. On the real arm this is the ADC driver, here a scripted source can
//! replay recorded or hand written stick movements.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod scripted;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::arm_state::NUM_AXES;

pub use scripted::ScriptedSource;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Sample of a perfectly centred stick.
pub const CENTRED: RawSamples = [2048; NUM_AXES];

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// Raw samples of each input channel in channel order (x, y, z, claw).
pub type RawSamples = [u16; NUM_AXES];

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of raw stick samples.
pub trait SampleSource {
    /// Read the samples for this cycle.
    ///
    /// Returns `Ok(None)` once the source has no more samples to give.
    fn read(&mut self) -> Result<Option<RawSamples>, SampleSrcError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SampleSrcError {
    #[error("Cannot open the sample script: {0}")]
    ScriptOpenError(csv::Error),

    #[error("Invalid record in the sample script: {0}")]
    InvalidRecord(csv::Error),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A source which always gives the same samples.
#[derive(Debug, Clone, Copy)]
pub struct ConstSource(pub RawSamples);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ConstSource {
    fn default() -> Self {
        ConstSource(CENTRED)
    }
}

impl SampleSource for ConstSource {
    fn read(&mut self) -> Result<Option<RawSamples>, SampleSrcError> {
        Ok(Some(self.0))
    }
}
