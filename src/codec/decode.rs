// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Grid decoding.
//!
//! Each row is scanned by a small state machine that merges extend runs
//! into the note (or rest) they continue. State never carries over from one
//! row to the next: a row that opens with extend cells starts with a rest.

use tracing::debug;

use super::grid::{Cell, Grid};
use crate::error::Result;
use crate::music::MidiNote;

/// A decoded note or rest, in eighth-note units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedNote {
    /// `None` for a rest
    pub pitch: Option<MidiNote>,
    pub units: u32,
}

impl DecodedNote {
    /// One-unit note
    pub fn note(pitch: MidiNote) -> Self {
        Self {
            pitch: Some(pitch),
            units: 1,
        }
    }

    /// One-unit rest
    pub fn rest() -> Self {
        Self {
            pitch: None,
            units: 1,
        }
    }

    /// Same note with a different length
    pub fn with_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Check if this is a rest
    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }
}

/// One decoded measure
pub type DecodedMeasure = Vec<DecodedNote>;

/// Decoder state within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    NoCurrentNote,
    HasCurrentNote(DecodedNote),
}

/// Accumulates the notes of one row, cell by cell
#[derive(Debug, Clone)]
pub struct RowDecoder {
    state: RowState,
    notes: DecodedMeasure,
}

impl RowDecoder {
    /// Start a fresh row
    pub fn new() -> Self {
        Self {
            state: RowState::NoCurrentNote,
            notes: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> RowState {
        self.state
    }

    /// Consume one cell
    pub fn push(&mut self, cell: &Cell) -> Result<()> {
        self.state = match (self.state, cell) {
            (RowState::NoCurrentNote, Cell::Extend) => RowState::HasCurrentNote(DecodedNote::rest()),
            (RowState::NoCurrentNote, Cell::Value(pitch)) => {
                RowState::HasCurrentNote(DecodedNote::note(pitch.to_midi()?))
            }
            (RowState::HasCurrentNote(mut held), Cell::Extend) => {
                held.units += 1;
                RowState::HasCurrentNote(held)
            }
            (RowState::HasCurrentNote(held), Cell::Value(pitch)) => {
                let next = DecodedNote::note(pitch.to_midi()?);
                self.notes.push(held);
                RowState::HasCurrentNote(next)
            }
        };
        Ok(())
    }

    /// End of row: emit the held note and return the measure
    pub fn finish(mut self) -> DecodedMeasure {
        if let RowState::HasCurrentNote(held) = self.state {
            self.notes.push(held);
        }
        self.notes
    }
}

impl Default for RowDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a single row
pub fn decode_row(row: &[Cell]) -> Result<DecodedMeasure> {
    let mut decoder = RowDecoder::new();
    for cell in row {
        decoder.push(cell)?;
    }
    Ok(decoder.finish())
}

/// Decode every row of the grid into a measure
pub fn decode(grid: &Grid) -> Result<Vec<DecodedMeasure>> {
    let measures = grid
        .rows()
        .iter()
        .map(|row| decode_row(row))
        .collect::<Result<Vec<_>>>()?;

    debug!(measures = measures.len(), "decoded grid");
    Ok(measures)
}
