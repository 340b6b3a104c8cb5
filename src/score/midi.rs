// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file rendering.
//!
//! Renders a score as a Type 0 MIDI file: one track carrying tempo, time
//! signature, key signature, track name and the notes. Rests only advance
//! the running tick.

use std::io::{self, Write};

use super::{Element, Score};
use crate::error::Result;

/// Default ticks per quarter note
pub const DEFAULT_PPQN: u16 = 480;

/// A note for export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNote {
    /// Start tick
    pub tick: u64,
    /// Note number (0-127)
    pub note: u8,
    /// Velocity (1-127)
    pub velocity: u8,
    /// Duration in ticks
    pub duration: u64,
}

impl ExportNote {
    /// End tick
    pub fn end_tick(&self) -> u64 {
        self.tick.saturating_add(self.duration)
    }
}

/// Largest tick delta a variable-length quantity can hold
const MAX_DELTA: u64 = 0x0FFF_FFFF;

/// Track event, placed at an absolute tick
#[derive(Debug, Clone, PartialEq)]
enum TrackEvent {
    TrackName(String),
    Tempo { micros_per_quarter: u32 },
    TimeSignature { numerator: u8, denominator: u8 },
    KeySignature { fifths: i8 },
    NoteOff { note: u8 },
    NoteOn { note: u8, velocity: u8 },
}

impl TrackEvent {
    /// Ordering among events on the same tick: meta first, then releases
    fn rank(&self) -> u8 {
        match self {
            TrackEvent::NoteOff { .. } => 1,
            TrackEvent::NoteOn { .. } => 2,
            _ => 0,
        }
    }

    /// Raw bytes following the delta time
    fn encode(&self, channel: u8, out: &mut Vec<u8>) {
        let channel = channel & 0x0F;
        match self {
            TrackEvent::TrackName(name) => {
                let bytes = &name.as_bytes()[..name.len().min(127)];
                out.extend_from_slice(&[0xFF, 0x03, bytes.len() as u8]);
                out.extend_from_slice(bytes);
            }
            TrackEvent::Tempo { micros_per_quarter } => {
                out.extend_from_slice(&[0xFF, 0x51, 0x03]);
                out.extend_from_slice(&micros_per_quarter.to_be_bytes()[1..]);
            }
            TrackEvent::TimeSignature { numerator, denominator } => {
                // Denominator is stored as a power of two; 24 clocks per click, 8 32nds per quarter
                let power = (*denominator).max(1).ilog2() as u8;
                out.extend_from_slice(&[0xFF, 0x58, 0x04, *numerator, power, 24, 8]);
            }
            TrackEvent::KeySignature { fifths } => {
                out.extend_from_slice(&[0xFF, 0x59, 0x02, *fifths as u8, 0]);
            }
            TrackEvent::NoteOff { note } => out.extend_from_slice(&[0x80 | channel, note & 0x7F, 0]),
            TrackEvent::NoteOn { note, velocity } => {
                out.extend_from_slice(&[0x90 | channel, note & 0x7F, velocity & 0x7F])
            }
        }
    }
}

/// Renders a score as a Type 0 MIDI file
#[derive(Debug, Clone)]
pub struct MidiRenderer {
    /// PPQN (ticks per quarter note)
    ppqn: u16,
    /// Tempo in BPM
    tempo: f64,
    /// Time signature
    time_sig: (u8, u8),
    /// Key signature in fifths
    key_fifths: i8,
    /// Track name
    name: String,
    /// MIDI channel (0-15)
    channel: u8,
    /// Notes in score order
    notes: Vec<ExportNote>,
}

impl MidiRenderer {
    /// Build a renderer for a score, resolving every pitch
    pub fn from_score(score: &Score) -> Result<Self> {
        Self::with_ppqn(score, DEFAULT_PPQN)
    }

    /// Build a renderer with a custom tick resolution
    pub fn with_ppqn(score: &Score, ppqn: u16) -> Result<Self> {
        let ppqn = ppqn.max(1);
        let mut notes = Vec::new();
        let mut tick = 0u64;

        for element in score.elements() {
            let duration = (element.quarter_length() * ppqn as f64).round() as u64;
            if let Element::Note { pitch, .. } = element {
                notes.push(ExportNote {
                    tick,
                    note: pitch.to_midi()?,
                    velocity: 64,
                    duration,
                });
            }
            tick = tick.saturating_add(duration);
        }

        Ok(Self {
            ppqn,
            tempo: 120.0,
            time_sig: (
                score.time_signature.numerator.max(1),
                score.time_signature.denominator.max(1),
            ),
            key_fifths: score.key.fifths,
            name: score.metadata.title.clone(),
            channel: 0,
            notes,
        })
    }

    /// Get PPQN
    pub fn ppqn(&self) -> u16 {
        self.ppqn
    }

    /// Set tempo
    pub fn set_tempo(&mut self, bpm: f64) {
        self.tempo = bpm.clamp(20.0, 300.0);
    }

    /// Get tempo
    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Get notes
    pub fn notes(&self) -> &[ExportNote] {
        &self.notes
    }

    /// Export to bytes
    pub fn export_to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }

    /// Write MIDI data to writer
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let track = self.track_chunk()?;

        let mut header = Vec::with_capacity(14);
        header.extend_from_slice(b"MThd");
        header.extend_from_slice(&6u32.to_be_bytes());
        header.extend_from_slice(&0u16.to_be_bytes()); // format 0
        header.extend_from_slice(&1u16.to_be_bytes()); // one track
        header.extend_from_slice(&self.ppqn.to_be_bytes());

        writer.write_all(&header)?;
        writer.write_all(b"MTrk")?;
        writer.write_all(&(track.len() as u32).to_be_bytes())?;
        writer.write_all(&track)
    }

    /// Events in playback order
    fn events(&self) -> Vec<(u64, TrackEvent)> {
        let micros_per_quarter = (60_000_000.0 / self.tempo).round() as u32;
        let mut events = vec![
            (0, TrackEvent::TrackName(self.name.clone())),
            (0, TrackEvent::Tempo { micros_per_quarter }),
            (
                0,
                TrackEvent::TimeSignature {
                    numerator: self.time_sig.0,
                    denominator: self.time_sig.1,
                },
            ),
            (0, TrackEvent::KeySignature { fifths: self.key_fifths }),
        ];

        for note in &self.notes {
            events.push((
                note.tick,
                TrackEvent::NoteOn {
                    note: note.note,
                    velocity: note.velocity,
                },
            ));
            events.push((note.end_tick(), TrackEvent::NoteOff { note: note.note }));
        }

        events.sort_by_key(|(tick, event)| (*tick, event.rank()));
        events
    }

    /// Track body: delta-timed events closed by end-of-track
    fn track_chunk(&self) -> io::Result<Vec<u8>> {
        let mut track = Vec::new();
        let mut last_tick = 0u64;

        for (tick, event) in self.events() {
            push_delta(&mut track, tick - last_tick)?;
            event.encode(self.channel, &mut track);
            last_tick = tick;
        }

        push_delta(&mut track, 0)?;
        track.extend_from_slice(&[0xFF, 0x2F, 0x00]);
        Ok(track)
    }
}

/// Append a delta time as a variable-length quantity
fn push_delta(out: &mut Vec<u8>, delta: u64) -> io::Result<()> {
    if delta > MAX_DELTA {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("tick delta {} exceeds the MIDI limit", delta),
        ));
    }

    let mut started = false;
    for shift in [21u32, 14, 7] {
        let group = ((delta >> shift) & 0x7F) as u8;
        if started || group != 0 {
            out.push(group | 0x80);
            started = true;
        }
    }
    out.push((delta & 0x7F) as u8);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::score::{KeySignature, Measure};

    fn score(elements: Vec<Element>) -> Score {
        Score {
            measures: vec![Measure::new(KeySignature::C_MAJOR, elements)],
            ..Score::default()
        }
    }

    #[test]
    fn test_notes_from_score() {
        let renderer = MidiRenderer::with_ppqn(
            &score(vec![Element::note(60, 1.0), Element::rest(0.5), Element::note("E4", 0.5)]),
            24,
        )
        .unwrap();

        assert_eq!(renderer.ppqn(), 24);
        assert_eq!(
            renderer.notes(),
            &[
                ExportNote { tick: 0, note: 60, velocity: 64, duration: 24 },
                ExportNote { tick: 36, note: 64, velocity: 64, duration: 12 },
            ]
        );
    }

    #[test]
    fn test_unknown_pitch_fails() {
        let result = MidiRenderer::from_score(&score(vec![Element::note("X9", 1.0)]));
        assert!(matches!(result, Err(CodecError::UnknownPitch(_))));
    }

    #[test]
    fn test_export_bytes() {
        let renderer = MidiRenderer::with_ppqn(&score(vec![Element::note(60, 1.0)]), 24).unwrap();
        let bytes = renderer.export_to_bytes().unwrap();

        // Check header
        assert_eq!(&bytes[0..4], b"MThd");
        assert_eq!(bytes[9], 0); // Format 0
        assert_eq!(&bytes[10..12], &1u16.to_be_bytes()); // 1 track
        assert_eq!(&bytes[12..14], &24u16.to_be_bytes()); // PPQN

        // Check track chunk and end of track
        assert_eq!(&bytes[14..18], b"MTrk");
        assert_eq!(&bytes[bytes.len() - 3..], &[0xFF, 0x2F, 0x00]);
    }

    #[test]
    fn test_delta_encoding() {
        let mut buffer = Vec::new();

        push_delta(&mut buffer, 0).unwrap();
        assert_eq!(buffer, vec![0x00]);

        buffer.clear();
        push_delta(&mut buffer, 128).unwrap();
        assert_eq!(buffer, vec![0x81, 0x00]);

        buffer.clear();
        push_delta(&mut buffer, 16383).unwrap();
        assert_eq!(buffer, vec![0xFF, 0x7F]);

        buffer.clear();
        push_delta(&mut buffer, MAX_DELTA).unwrap();
        assert_eq!(buffer, vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn test_oversized_delta_is_an_error() {
        let mut buffer = Vec::new();
        let err = push_delta(&mut buffer, MAX_DELTA + 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        // Far past the limit, not wrapped into a short delta
        let renderer = MidiRenderer::from_score(&score(vec![Element::note(60, 1e10)])).unwrap();
        assert!(renderer.export_to_bytes().is_err());
    }

    #[test]
    fn test_meta_event_bytes() {
        let mut tempo = Vec::new();
        TrackEvent::Tempo { micros_per_quarter: 500_000 }.encode(0, &mut tempo);
        // 120 BPM = 500000 microseconds per beat = 0x07A120
        assert_eq!(tempo, vec![0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]);

        let mut key = Vec::new();
        TrackEvent::KeySignature { fifths: -2 }.encode(0, &mut key);
        assert_eq!(key, vec![0xFF, 0x59, 0x02, 0xFE, 0x00]);

        let mut time = Vec::new();
        TrackEvent::TimeSignature { numerator: 3, denominator: 8 }.encode(0, &mut time);
        assert_eq!(time, vec![0xFF, 0x58, 0x04, 3, 3, 24, 8]);
    }

    #[test]
    fn test_release_precedes_attack_on_same_tick() {
        let renderer = MidiRenderer::with_ppqn(
            &score(vec![Element::note(60, 1.0), Element::note(60, 1.0)]),
            24,
        )
        .unwrap();

        let at_24: Vec<TrackEvent> = renderer
            .events()
            .into_iter()
            .filter(|(tick, _)| *tick == 24)
            .map(|(_, event)| event)
            .collect();
        assert_eq!(
            at_24,
            vec![
                TrackEvent::NoteOff { note: 60 },
                TrackEvent::NoteOn { note: 60, velocity: 64 },
            ]
        );
    }

    #[test]
    fn test_set_tempo_clamps() {
        let mut renderer = MidiRenderer::from_score(&Score::default()).unwrap();
        renderer.set_tempo(1000.0);
        assert_eq!(renderer.tempo(), 300.0);
    }
}
