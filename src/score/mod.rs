// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Symbolic scores.
//!
//! A [`Score`] is an ordered list of measures holding notes and rests with
//! quarter-note durations, plus title, composer, meter and key. Scores are
//! stored as YAML documents and can be rendered as Standard MIDI Files or
//! printed as text.

pub mod io;
pub mod midi;

pub use io::{display, parse, render_text, write, FileRenderer, ScoreRenderer};
pub use midi::MidiRenderer;

use serde::{Deserialize, Serialize};

use crate::music::PitchRef;

/// Score title/composer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_composer")]
    pub composer: String,
}

fn default_title() -> String {
    "Untitled".to_string()
}
fn default_composer() -> String {
    "Unknown".to_string()
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: default_title(),
            composer: default_composer(),
        }
    }
}

/// Time signature (numerator/denominator)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

/// Key signature as a count of sharps (positive) or flats (negative)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeySignature {
    #[serde(default)]
    pub fifths: i8,
}

impl KeySignature {
    /// No sharps or flats
    pub const C_MAJOR: KeySignature = KeySignature { fifths: 0 };
}

/// A note or rest inside a measure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// Sounding note
    Note { pitch: PitchRef, quarter_length: f64 },
    /// Silence
    Rest { quarter_length: f64 },
}

impl Element {
    /// Create a note
    pub fn note(pitch: impl Into<PitchRef>, quarter_length: f64) -> Self {
        Element::Note {
            pitch: pitch.into(),
            quarter_length,
        }
    }

    /// Create a rest
    pub fn rest(quarter_length: f64) -> Self {
        Element::Rest { quarter_length }
    }

    /// Duration in quarter notes
    pub fn quarter_length(&self) -> f64 {
        match self {
            Element::Note { quarter_length, .. } | Element::Rest { quarter_length } => {
                *quarter_length
            }
        }
    }

    /// Check if this element is a rest
    pub fn is_rest(&self) -> bool {
        matches!(self, Element::Rest { .. })
    }
}

/// One bar of music
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Measure {
    /// Key in effect for this measure
    #[serde(default)]
    pub key: KeySignature,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Measure {
    /// Create a measure in the given key
    pub fn new(key: KeySignature, elements: Vec<Element>) -> Self {
        Self { key, elements }
    }

    /// Total duration in quarter notes
    pub fn quarter_length(&self) -> f64 {
        self.elements.iter().map(Element::quarter_length).sum()
    }
}

/// A complete single-part score
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Score {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub time_signature: TimeSignature,
    #[serde(default)]
    pub key: KeySignature,
    #[serde(default)]
    pub measures: Vec<Measure>,
}

impl Score {
    /// Parse a score from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// All elements in score order, across measures
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.measures.iter().flat_map(|m| m.elements.iter())
    }
}
