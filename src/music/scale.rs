// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes and diatonic scales.
//!
//! Used for spelling MIDI numbers as note names and for moving pitches
//! by scale degree when melodies are mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Semitone offset type
pub type Semitones = i8;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        match self {
            Note::C => 0,
            Note::Cs => 1,
            Note::D => 2,
            Note::Ds => 3,
            Note::E => 4,
            Note::F => 5,
            Note::Fs => 6,
            Note::G => 7,
            Note::Gs => 8,
            Note::A => 9,
            Note::As => 10,
            Note::B => 11,
        }
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Natural note for a letter name (case-insensitive)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Note::C),
            'D' => Some(Note::D),
            'E' => Some(Note::E),
            'F' => Some(Note::F),
            'G' => Some(Note::G),
            'A' => Some(Note::A),
            'B' => Some(Note::B),
            _ => None,
        }
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        let new_pc = (self.pitch_class() as i8 + semitones).rem_euclid(12) as u8;
        Note::from_pitch_class(new_pc)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        };
        write!(f, "{}", name)
    }
}

/// A scale with root and intervals
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Note,
    notes: Vec<Note>,
}

impl Scale {
    /// Major scale intervals (semitones from root)
    pub const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

    /// Create a major scale on the given root
    pub fn major(root: Note) -> Self {
        let notes = Self::MAJOR
            .iter()
            .map(|&i| root.transpose(i as Semitones))
            .collect();
        Self { root, notes }
    }

    /// C major, the key context of every assembled score
    pub fn c_major() -> Self {
        Self::major(Note::C)
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the notes in this scale
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Get the number of notes in this scale
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if this scale is empty
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if a MIDI note is in this scale
    pub fn contains_midi(&self, midi_note: MidiNote) -> bool {
        self.notes.contains(&Note::from_pitch_class(midi_note % 12))
    }

    /// Transpose a MIDI note by scale degrees (positive = up, negative = down).
    /// Notes outside the scale move from their nearest degree.
    pub fn transpose_in_scale(&self, midi_note: MidiNote, degrees: i32) -> MidiNote {
        if self.is_empty() {
            return midi_note;
        }

        let note = Note::from_pitch_class(midi_note % 12);
        let octave = (midi_note / 12) as i32 - 1;

        let current_degree = self
            .notes
            .iter()
            .position(|&n| n == note)
            .unwrap_or_else(|| self.nearest_degree(note));

        let scale_len = self.len() as i32;
        let new_pos = current_degree as i32 + degrees;
        let new_note = self.notes[new_pos.rem_euclid(scale_len) as usize];
        let new_octave = octave + new_pos.div_euclid(scale_len);
        let result = (new_octave + 1) * 12 + new_note.pitch_class() as i32;

        result.clamp(0, 127) as MidiNote
    }

    /// Find the nearest scale degree for a note not in the scale
    fn nearest_degree(&self, note: Note) -> usize {
        let pc = note.pitch_class() as i8;
        let mut min_dist = 12i8;
        let mut nearest = 0usize;

        for (i, &scale_note) in self.notes.iter().enumerate() {
            let diff = (pc - scale_note.pitch_class() as i8).abs();
            let dist = diff.min(12 - diff);
            if dist < min_dist {
                min_dist = dist;
                nearest = i;
            }
        }

        nearest
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} major", self.root)
    }
}
