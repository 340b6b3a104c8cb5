// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the melody codec.
//!
//! Every codec failure aborts the whole conversion. No partial grid or
//! measure list is ever returned alongside an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting between scores and grids
#[derive(Debug, Error)]
pub enum CodecError {
    /// A note duration is not a positive multiple of an eighth note
    #[error("duration {quarter_length} quarter notes is not a multiple of 0.5")]
    InvalidDuration { quarter_length: f64 },

    /// The flat cell stream cannot be split into rows of the grid width
    #[error("{cells} cells cannot be split into rows of width {width}")]
    NonDivisibleLength { cells: usize, width: usize },

    /// A grid row has the wrong number of cells
    #[error("row {row} has {len} cells, expected {width}")]
    RaggedRow { row: usize, len: usize, width: usize },

    /// A symbolic pitch name could not be resolved
    #[error("unknown pitch: {0:?}")]
    UnknownPitch(String),

    /// A score document is missing or malformed
    #[error("failed to parse score {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A score could not be written to disk
    #[error("failed to write score {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A population was requested from an empty list of files
    #[error("cannot build a population from an empty file list")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, CodecError>;
