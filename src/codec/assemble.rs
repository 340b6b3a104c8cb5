// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Measure assembly.
//!
//! Wraps decoded measures into a score. The metadata never depends on the
//! content: 4/4, C major, placeholder title and composer.

use tracing::debug;

use super::decode::{DecodedMeasure, DecodedNote};
use super::extract::quarter_length_from_units;
use crate::music::PitchRef;
use crate::score::{Element, KeySignature, Measure, Metadata, Score, TimeSignature};

/// Convert one decoded note or rest into a score element
pub fn to_element(note: &DecodedNote) -> Element {
    let quarter_length = quarter_length_from_units(note.units);
    match note.pitch {
        Some(pitch) => Element::Note {
            pitch: PitchRef::Midi(pitch),
            quarter_length,
        },
        None => Element::Rest { quarter_length },
    }
}

/// Wrap one decoded measure in C major
pub fn to_measure(notes: &[DecodedNote]) -> Measure {
    Measure::new(KeySignature::C_MAJOR, notes.iter().map(to_element).collect())
}

/// Build a full score from decoded measures, in order
pub fn assemble(measures: &[DecodedMeasure]) -> Score {
    let score = Score {
        metadata: Metadata::default(),
        time_signature: TimeSignature::default(),
        key: KeySignature::C_MAJOR,
        measures: measures.iter().map(|m| to_measure(m)).collect(),
    };

    debug!(measures = score.measures.len(), "assembled score");
    score
}
