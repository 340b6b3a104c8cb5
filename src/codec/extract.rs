// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch/duration extraction.
//!
//! Turns a parsed score into the ordered list of sounding notes. Rests are
//! skipped: only notes become events.

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::music::PitchRef;
use crate::score::{Element, Score};

/// Quarter notes per grid unit (one eighth note)
pub const QUARTERS_PER_UNIT: f64 = 0.5;

/// A sounding note measured in eighth-note units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub pitch: PitchRef,
    /// Always at least 1
    pub units: u32,
}

impl Event {
    /// Create an event from a quarter-note duration
    pub fn new(pitch: impl Into<PitchRef>, quarter_length: f64) -> Result<Self> {
        Ok(Self {
            pitch: pitch.into(),
            units: units_from_quarter_length(quarter_length)?,
        })
    }

    /// Duration in quarter notes
    pub fn quarter_length(&self) -> f64 {
        quarter_length_from_units(self.units)
    }
}

/// Convert a quarter-note duration to eighth-note units.
///
/// Fails unless the duration is a positive exact multiple of 0.5.
pub fn units_from_quarter_length(quarter_length: f64) -> Result<u32> {
    let units = quarter_length / QUARTERS_PER_UNIT;
    if !units.is_finite() || units < 1.0 || units.fract() != 0.0 || units > u32::MAX as f64 {
        return Err(CodecError::InvalidDuration { quarter_length });
    }
    Ok(units as u32)
}

/// Convert eighth-note units back to a quarter-note duration
pub fn quarter_length_from_units(units: u32) -> f64 {
    units as f64 * QUARTERS_PER_UNIT
}

/// Collect every note of the score, in order, as an event
pub fn extract_events(score: &Score) -> Result<Vec<Event>> {
    let events = score
        .elements()
        .filter_map(|element| match element {
            Element::Note {
                pitch,
                quarter_length,
            } => Some(Event::new(pitch.clone(), *quarter_length)),
            Element::Rest { .. } => None,
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(events = events.len(), "extracted note events");
    Ok(events)
}
