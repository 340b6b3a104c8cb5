// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities.
//!
//! Pitch references (numeric or named), pitch classes and the diatonic
//! scale used as key context for generated melodies.

pub mod pitch;
pub mod scale;

pub use pitch::{parse_pitch_name, pitch_name, PitchRef};
pub use scale::{MidiNote, Note, Scale};
