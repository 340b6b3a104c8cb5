// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melody grid codec.
//!
//! Converts between symbolic scores (notes and rests with quarter-note
//! durations) and fixed-width grids of eighth-note cells used as
//! chromosomes by a genetic-algorithm melody evolver.
//!
//! ```no_run
//! use melody_grid::{CodecConfig, Converter};
//!
//! let converter = Converter::new(CodecConfig::default());
//! let grid = converter.music_to_grid("theme.yaml")?;
//! converter.grid_to_music(grid, None)?;
//! # Ok::<(), melody_grid::CodecError>(())
//! ```

pub mod codec;
pub mod config;
pub mod converter;
pub mod error;
pub mod evolution;
pub mod music;
pub mod score;

pub use codec::{Cell, DecodedNote, Event, Grid};
pub use config::CodecConfig;
pub use converter::Converter;
pub use error::{CodecError, Result};
pub use evolution::{FitFunction, Individual, Population, ScaleFitness};
pub use music::PitchRef;
pub use score::{Element, Measure, Score};
