// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The melody grid: the chromosome representation of a melody.
//!
//! A grid is a list of measures (rows). Every row holds exactly `width`
//! cells at eighth-note granularity. A cell either starts a note with a
//! pitch or extends whatever came before it by one eighth note.

use std::fmt;

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::music::PitchRef;

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Start of a note with this pitch
    Value(PitchRef),
    /// Continue the previous note or rest by one eighth
    Extend,
}

impl Cell {
    /// Value cell for a pitch
    pub fn value(pitch: impl Into<PitchRef>) -> Self {
        Cell::Value(pitch.into())
    }

    /// Check if this is a continuation cell
    pub fn is_extend(&self) -> bool {
        matches!(self, Cell::Extend)
    }

    /// Read a numeric cell: `extend_code` marks a continuation, 0-127 a pitch
    pub fn from_code(code: i32, extend_code: i32) -> Result<Self> {
        if code == extend_code {
            Ok(Cell::Extend)
        } else if (0..=127).contains(&code) {
            Ok(Cell::Value(PitchRef::Midi(code as u8)))
        } else {
            Err(CodecError::UnknownPitch(code.to_string()))
        }
    }

    /// Read a symbolic cell: an empty string marks a continuation
    pub fn from_symbol(symbol: &str) -> Self {
        if symbol.trim().is_empty() {
            Cell::Extend
        } else {
            Cell::Value(PitchRef::Named(symbol.trim().to_string()))
        }
    }

    /// Numeric form of this cell
    pub fn to_code(&self, extend_code: i32) -> Result<i32> {
        match self {
            Cell::Value(pitch) => pitch.to_midi().map(i32::from),
            Cell::Extend => Ok(extend_code),
        }
    }
}

/// Fixed-width rows of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from rows, rejecting a zero width or any row that is not
    /// `width` long
    pub fn from_rows(rows: Vec<Vec<Cell>>, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(CodecError::NonDivisibleLength {
                cells: rows.iter().map(Vec::len).sum(),
                width,
            });
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != width)
        {
            return Err(CodecError::RaggedRow {
                row,
                len: cells.len(),
                width,
            });
        }
        Ok(Self { width, rows })
    }

    /// Split a flat cell stream into rows of `width`, in order.
    ///
    /// The stream length must be an exact multiple of `width`; nothing is
    /// padded or dropped.
    pub fn reshape(cells: Vec<Cell>, width: usize) -> Result<Self> {
        if width == 0 || cells.len() % width != 0 {
            return Err(CodecError::NonDivisibleLength {
                cells: cells.len(),
                width,
            });
        }

        let rows = cells.chunks(width).map(<[Cell]>::to_vec).collect();
        Ok(Self { width, rows })
    }

    /// Read a numeric grid, as produced by [`Grid::to_codes`]
    pub fn from_codes(rows: &[Vec<i32>], config: &CodecConfig) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&code| Cell::from_code(code, config.extend_code))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows, config.grid_width)
    }

    /// Read a grid of pitch names, where empty strings are continuations
    pub fn from_symbols<S: AsRef<str>>(rows: &[Vec<S>], width: usize) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|s| Cell::from_symbol(s.as_ref())).collect::<Vec<_>>())
            .collect();
        Self::from_rows(rows, width)
    }

    /// Numeric form of the grid
    pub fn to_codes(&self, extend_code: i32) -> Result<Vec<Vec<i32>>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_code(extend_code))
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }

    /// Cells per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (measures)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in order
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// All cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Mutable access to all cells, row-major. Row widths cannot change.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flatten()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Value(pitch) => pitch.to_string(),
                    Cell::Extend => "_".to_string(),
                })
                .collect();
            write!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape() {
        let cells = vec![
            Cell::value(60),
            Cell::Extend,
            Cell::value(62),
            Cell::Extend,
        ];

        let grid = Grid::reshape(cells, 2).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.rows()[1], vec![Cell::value(62), Cell::Extend]);
    }

    #[test]
    fn test_reshape_not_divisible() {
        let cells = vec![Cell::value(60); 7];
        assert!(matches!(
            Grid::reshape(cells, 8),
            Err(CodecError::NonDivisibleLength { cells: 7, width: 8 })
        ));
        assert!(Grid::reshape(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_ragged_rows() {
        let rows = vec![vec![Cell::Extend; 8], vec![Cell::Extend; 7]];
        assert!(matches!(
            Grid::from_rows(rows, 8),
            Err(CodecError::RaggedRow { row: 1, len: 7, width: 8 })
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(
            Grid::from_rows(Vec::new(), 0),
            Err(CodecError::NonDivisibleLength { cells: 0, width: 0 })
        ));
        assert!(matches!(
            Grid::from_rows(vec![Vec::new()], 0),
            Err(CodecError::NonDivisibleLength { cells: 0, width: 0 })
        ));
        assert!(Grid::from_symbols::<&str>(&[], 0).is_err());
    }

    #[test]
    fn test_codes_round_trip() {
        let config = CodecConfig {
            grid_width: 4,
            ..CodecConfig::default()
        };
        let codes = vec![vec![60, -1, -1, 64], vec![-1, 67, -1, -1]];

        let grid = Grid::from_codes(&codes, &config).unwrap();
        assert_eq!(grid.rows()[0][0], Cell::value(60));
        assert!(grid.rows()[1][0].is_extend());
        assert_eq!(grid.to_codes(config.extend_code).unwrap(), codes);
    }

    #[test]
    fn test_bad_code() {
        let config = CodecConfig {
            grid_width: 2,
            ..CodecConfig::default()
        };
        assert!(matches!(
            Grid::from_codes(&[vec![60, 300]], &config),
            Err(CodecError::UnknownPitch(_))
        ));
    }

    #[test]
    fn test_symbols() {
        let rows = vec![vec!["C", "", "", "D"], vec!["E", "", "C5", ""]];
        let grid = Grid::from_symbols(&rows, 4).unwrap();

        assert_eq!(grid.rows()[0][0], Cell::value("C"));
        assert!(grid.rows()[0][1].is_extend());
        assert_eq!(
            grid.to_codes(-1).unwrap(),
            vec![vec![60, -1, -1, 62], vec![64, -1, 72, -1]]
        );
    }

    #[test]
    fn test_display() {
        let grid = Grid::reshape(vec![Cell::value(60), Cell::Extend], 2).unwrap();
        assert_eq!(grid.to_string(), "[C4 _]");
    }
}
