// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Score/grid codec.
//!
//! Encode: score -> events ([`extract`]) -> grid ([`encode`]).
//! Decode: grid -> measures ([`decode`]) -> score ([`assemble`]).

pub mod assemble;
pub mod decode;
pub mod encode;
pub mod extract;
pub mod grid;

pub use assemble::assemble;
pub use decode::{decode, decode_row, DecodedMeasure, DecodedNote, RowDecoder, RowState};
pub use encode::{encode, expand};
pub use extract::{extract_events, Event};
pub use grid::{Cell, Grid};

use crate::config::CodecConfig;
use crate::error::Result;
use crate::score::Score;

/// Encode every note of a score as a grid
pub fn score_to_grid(score: &Score, config: &CodecConfig) -> Result<Grid> {
    let events = extract_events(score)?;
    encode(&events, config)
}

/// Decode a grid and assemble the result as a score
pub fn grid_to_score(grid: &Grid) -> Result<Score> {
    let measures = decode(grid)?;
    Ok(assemble(&measures))
}
