// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch references.
//!
//! A pitch arrives either as a MIDI number or as a name such as `"C#5"`.
//! [`PitchRef::to_midi`] is the one place both forms are resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scale::{MidiNote, Note};
use crate::error::{CodecError, Result};

/// Octave assumed for names written without one (`"C"` is middle C)
pub const DEFAULT_OCTAVE: i32 = 4;

/// A pitch as written: numeric or symbolic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PitchRef {
    /// MIDI note number (60 = C4)
    Midi(MidiNote),
    /// Scientific pitch name (e.g. "C4", "Eb3", "F#")
    Named(String),
}

impl PitchRef {
    /// Resolve to a MIDI note number
    pub fn to_midi(&self) -> Result<MidiNote> {
        match self {
            PitchRef::Midi(n) if *n <= 127 => Ok(*n),
            PitchRef::Midi(n) => Err(CodecError::UnknownPitch(n.to_string())),
            PitchRef::Named(name) => parse_pitch_name(name),
        }
    }

    /// Canonical form of this pitch
    pub fn normalize(&self) -> Result<PitchRef> {
        self.to_midi().map(PitchRef::Midi)
    }
}

impl From<MidiNote> for PitchRef {
    fn from(n: MidiNote) -> Self {
        PitchRef::Midi(n)
    }
}

impl From<&str> for PitchRef {
    fn from(name: &str) -> Self {
        PitchRef::Named(name.to_string())
    }
}

impl fmt::Display for PitchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchRef::Midi(n) => write!(f, "{}", pitch_name(*n)),
            PitchRef::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Parse a name like `"C4"`, `"c#"`, `"Bb3"` or `"E-5"` into a MIDI number
pub fn parse_pitch_name(name: &str) -> Result<MidiNote> {
    let unknown = || CodecError::UnknownPitch(name.to_string());
    let trimmed = name.trim();

    let mut chars = trimmed.chars();
    let letter = chars.next().and_then(Note::from_letter).ok_or_else(unknown)?;
    let rest = chars.as_str();

    let octave_start = rest
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (accidentals, octave) = rest.split_at(octave_start);

    let mut alter = 0i32;
    for c in accidentals.chars() {
        match c {
            '#' | 's' | 'S' => alter += 1,
            'b' | '-' => alter -= 1,
            _ => return Err(unknown()),
        }
    }

    let octave = if octave.is_empty() {
        DEFAULT_OCTAVE
    } else {
        octave.parse::<i32>().map_err(|_| unknown())?
    };

    let midi = octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|base| base.checked_add(letter.pitch_class() as i32 + alter))
        .ok_or_else(unknown)?;
    if (0..=127).contains(&midi) {
        Ok(midi as MidiNote)
    } else {
        Err(unknown())
    }
}

/// Spell a MIDI number with sharps, e.g. 61 -> "C#4"
pub fn pitch_name(midi: MidiNote) -> String {
    let octave = (midi / 12) as i32 - 1;
    format!("{}{}", Note::from_pitch_class(midi % 12), octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_pitch_name("C4").unwrap(), 60);
        assert_eq!(parse_pitch_name("C").unwrap(), 60);
        assert_eq!(parse_pitch_name("C5").unwrap(), 72);
        assert_eq!(parse_pitch_name("a4").unwrap(), 69);
        assert_eq!(parse_pitch_name("F#3").unwrap(), 54);
        assert_eq!(parse_pitch_name("Eb4").unwrap(), 63);
        assert_eq!(parse_pitch_name("E-4").unwrap(), 63);
        assert_eq!(parse_pitch_name("Cb4").unwrap(), 59);
        assert_eq!(parse_pitch_name(" G ").unwrap(), 67);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in [
            "",
            "H4",
            "C?4",
            "C4x",
            "G#9",
            "B#9",
            "C2147483647",
            "C-2147483648",
            "C178956970",
        ] {
            assert!(
                matches!(parse_pitch_name(bad), Err(CodecError::UnknownPitch(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_both_forms_resolve_to_same_pitch() {
        assert_eq!(
            PitchRef::Midi(64).to_midi().unwrap(),
            PitchRef::from("E").to_midi().unwrap()
        );
        assert_eq!(PitchRef::from("D4").normalize().unwrap(), PitchRef::Midi(62));
        assert!(PitchRef::Midi(200).to_midi().is_err());
    }

    #[test]
    fn test_pitch_name() {
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(61), "C#4");
        assert_eq!(pitch_name(21), "A0");
        assert_eq!(PitchRef::Midi(72).to_string(), "C5");
    }

    #[test]
    fn test_untagged_serde() {
        let pitches: Vec<PitchRef> = serde_yaml::from_str("[60, \"C5\"]").unwrap();
        assert_eq!(pitches, vec![PitchRef::Midi(60), PitchRef::from("C5")]);
    }
}
