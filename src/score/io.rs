// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Reading, writing and displaying scores.
//!
//! Score documents are YAML. Writing to a `.mid`/`.midi` path renders a
//! Standard MIDI File instead. File handles live only inside each call.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use super::midi::MidiRenderer;
use super::{Element, Score};
use crate::error::{CodecError, Result};
use crate::music::pitch_name;

/// Output sinks for finished scores
pub trait ScoreRenderer {
    /// Show the score without keeping it
    fn display(&self, score: &Score);

    /// Persist the score at `path`
    fn write(&self, score: &Score, path: &Path) -> Result<()>;
}

/// Renderer that prints to stdout and writes files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer;

impl ScoreRenderer for FileRenderer {
    fn display(&self, score: &Score) {
        display(score);
    }

    fn write(&self, score: &Score, path: &Path) -> Result<()> {
        write(score, path)
    }
}

/// Load a score document from a YAML file
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Score> {
    let path = path.as_ref();
    let parse_error = |message: String| CodecError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let contents = fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
    let score = Score::from_yaml(&contents).map_err(|e| parse_error(e.to_string()))?;

    debug!(?path, measures = score.measures.len(), "parsed score");
    Ok(score)
}

/// Write a score to disk, as MIDI for `.mid`/`.midi` paths and YAML otherwise
pub fn write<P: AsRef<Path>>(score: &Score, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source: io::Error| CodecError::Write {
        path: path.to_path_buf(),
        source,
    };

    let midi = if is_midi_path(path) {
        let renderer = MidiRenderer::from_score(score)?;
        Some(renderer.export_to_bytes().map_err(write_error)?)
    } else {
        None
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    if let Some(bytes) = midi {
        writer.write_all(&bytes).map_err(write_error)?;
    } else {
        serde_yaml::to_writer(&mut writer, score)
            .map_err(|e| write_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    }
    writer.flush().map_err(write_error)?;

    info!(?path, measures = score.measures.len(), "wrote score");
    Ok(())
}

fn is_midi_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mid") || ext.eq_ignore_ascii_case("midi"))
        .unwrap_or(false)
}

/// Print a text rendering of the score to stdout
pub fn display(score: &Score) {
    println!("{}", render_text(score));
}

/// Text rendering: a header line, then one line per measure.
///
/// Notes print as their name followed by one dash per extra eighth note;
/// rests print one dot per eighth note.
pub fn render_text(score: &Score) -> String {
    let mut out = format!(
        "{} by {} ({}/{}, {} fifths)",
        score.metadata.title,
        score.metadata.composer,
        score.time_signature.numerator,
        score.time_signature.denominator,
        score.key.fifths,
    );

    for measure in &score.measures {
        let tokens: Vec<String> = measure.elements.iter().map(render_element).collect();
        out.push_str("\n| ");
        out.push_str(&tokens.join(" "));
        out.push_str(" |");
    }

    out
}

/// Longest element drawn in full, in eighth notes
const MAX_RENDERED_EIGHTHS: f64 = 64.0;

fn render_element(element: &Element) -> String {
    let eighths = (element.quarter_length() * 2.0)
        .round()
        .max(1.0)
        .min(MAX_RENDERED_EIGHTHS) as usize;
    match element {
        Element::Note { pitch, .. } => {
            let name = pitch
                .to_midi()
                .map(pitch_name)
                .unwrap_or_else(|_| pitch.to_string());
            format!("{}{}", name, "-".repeat(eighths - 1))
        }
        Element::Rest { .. } => ".".repeat(eighths),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{KeySignature, Measure};

    fn sample_score() -> Score {
        Score {
            measures: vec![Measure::new(
                KeySignature::C_MAJOR,
                vec![Element::rest(1.0), Element::note(62, 3.0)],
            )],
            ..Score::default()
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_score());
        assert_eq!(text, "Untitled by Unknown (4/4, 0 fifths)\n| .. D4----- |");
    }

    #[test]
    fn test_render_clamps_durations() {
        let long = render_element(&Element::note(60, 1e300));
        assert_eq!(long, format!("C4{}", "-".repeat(63)));

        assert_eq!(render_element(&Element::rest(f64::NAN)), ".");
        assert_eq!(render_element(&Element::rest(f64::INFINITY)), ".".repeat(64));
    }

    #[test]
    fn test_midi_write_error_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.mid");
        let score = Score {
            measures: vec![Measure::new(KeySignature::C_MAJOR, vec![Element::note(60, 1e10)])],
            ..Score::default()
        };

        assert!(matches!(write(&score, &path), Err(CodecError::Write { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.yaml");

        write(&sample_score(), &path).unwrap();
        let parsed = parse(&path).unwrap();
        assert_eq!(parsed, sample_score());
    }

    #[test]
    fn test_midi_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.MID");

        write(&sample_score(), &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"MThd");
    }

    #[test]
    fn test_parse_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = parse(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(CodecError::Parse { .. })));

        let path = dir.path().join("bad.yaml");
        fs::write(&path, "measures: [[[").unwrap();
        assert!(matches!(parse(&path), Err(CodecError::Parse { .. })));
    }

    #[test]
    fn test_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("score.yaml");

        let result = write(&sample_score(), &path);
        assert!(matches!(result, Err(CodecError::Write { .. })));
    }
}
