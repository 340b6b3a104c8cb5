// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Grid encoding.
//!
//! Each event becomes one value cell followed by `units - 1` extend cells.
//! The flat stream is then cut into rows of the configured width.

use tracing::debug;

use super::extract::Event;
use super::grid::{Cell, Grid};
use crate::config::CodecConfig;
use crate::error::Result;

/// Expand events into the flat cell stream, normalizing every pitch
pub fn expand(events: &[Event]) -> Result<Vec<Cell>> {
    let total: usize = events.iter().map(|e| e.units as usize).sum();
    let mut cells = Vec::with_capacity(total);

    for event in events {
        cells.push(Cell::Value(event.pitch.normalize()?));
        cells.extend(std::iter::repeat(Cell::Extend).take(event.units.saturating_sub(1) as usize));
    }

    Ok(cells)
}

/// Encode events as a grid with `config.grid_width` cells per row
pub fn encode(events: &[Event], config: &CodecConfig) -> Result<Grid> {
    let cells = expand(events)?;
    let grid = Grid::reshape(cells, config.grid_width)?;

    debug!(
        events = events.len(),
        rows = grid.len(),
        width = grid.width(),
        "encoded grid"
    );
    Ok(grid)
}
