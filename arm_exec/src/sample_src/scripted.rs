//! Sample source replaying a CSV script

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

use super::{RawSamples, SampleSource, SampleSrcError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A row of a sample script.
///
/// The samples are held for `cycles` consecutive cycles.
#[derive(Debug, Deserialize)]
struct Record {
    cycles: u32,
    x: u16,
    y: u16,
    z: u16,
    claw: u16,
}

/// Replays the samples of a CSV script.
///
/// The script has a header row `cycles,x,y,z,claw` followed by one row per
/// stick position. Lines starting with `#` are ignored.
pub struct ScriptedSource<R: Read> {
    records: DeserializeRecordsIntoIter<R, Record>,

    /// Samples being held and the number of cycles left to hold them for.
    current: Option<(RawSamples, u32)>,

    num_cycles: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ScriptedSource<File> {
    /// Open a script file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SampleSrcError> {
        let reader = Self::builder()
            .from_path(path)
            .map_err(SampleSrcError::ScriptOpenError)?;

        Ok(Self::from_csv(reader))
    }
}

impl<R: Read> ScriptedSource<R> {
    /// Read a script from any reader.
    pub fn from_reader(rdr: R) -> Self {
        Self::from_csv(Self::builder().from_reader(rdr))
    }

    /// Number of cycles given out so far.
    pub fn num_cycles(&self) -> u64 {
        self.num_cycles
    }

    fn builder() -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.has_headers(true).comment(Some(b'#')).trim(Trim::All);
        builder
    }

    fn from_csv(reader: csv::Reader<R>) -> Self {
        Self {
            records: reader.into_deserialize(),
            current: None,
            num_cycles: 0,
        }
    }
}

impl<R: Read> SampleSource for ScriptedSource<R> {
    fn read(&mut self) -> Result<Option<RawSamples>, SampleSrcError> {
        // Move on to the next row with a non-zero hold
        loop {
            match self.current {
                Some((_, remaining)) if remaining > 0 => break,
                _ => (),
            }

            match self.records.next() {
                Some(Ok(r)) => {
                    debug!("Script row {:?}", r);
                    self.current = Some(([r.x, r.y, r.z, r.claw], r.cycles));
                }
                Some(Err(e)) => return Err(SampleSrcError::InvalidRecord(e)),
                None => return Ok(None),
            }
        }

        match self.current.as_mut() {
            Some((samples, remaining)) => {
                *remaining -= 1;
                self.num_cycles += 1;
                Ok(Some(*samples))
            }
            None => Ok(None),
        }
    }
}
