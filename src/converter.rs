// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Conversion between score files and genetic-algorithm individuals.
//!
//! File names are resolved against the configured data directory.

use std::path::Path;

use tracing::info;

use crate::codec::{grid_to_score, score_to_grid, Grid};
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::evolution::{FitFunction, Individual, Population};
use crate::score::{self, FileRenderer, Score, ScoreRenderer};

/// Reads score files into grids and renders individuals back out
pub struct Converter<R: ScoreRenderer = FileRenderer> {
    config: CodecConfig,
    renderer: R,
}

impl Converter<FileRenderer> {
    /// Create a converter that prints to stdout and writes to disk
    pub fn new(config: CodecConfig) -> Self {
        Self::with_renderer(config, FileRenderer)
    }
}

impl<R: ScoreRenderer> Converter<R> {
    /// Create a converter with a custom output sink
    pub fn with_renderer(config: CodecConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Get the configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Parse a score file from the data directory and encode it
    pub fn music_to_grid<P: AsRef<Path>>(&self, file: P) -> Result<Grid> {
        let path = self.config.data_path(file);
        let score = score::parse(&path)?;
        let grid = score_to_grid(&score, &self.config)?;

        info!(?path, rows = grid.len(), "converted score to grid");
        Ok(grid)
    }

    /// Decode an individual's melody into a score.
    ///
    /// With `file` unset the score is displayed; otherwise it is written
    /// to that name inside the data directory.
    pub fn individual_to_music(&self, individual: &Individual, file: Option<&Path>) -> Result<Score> {
        let score = grid_to_score(&individual.melody)?;

        match file {
            None => self.renderer.display(&score),
            Some(file) => self.renderer.write(&score, &self.config.data_path(file))?,
        }
        Ok(score)
    }

    /// Same as [`Converter::individual_to_music`] for a bare grid
    pub fn grid_to_music(&self, grid: Grid, file: Option<&Path>) -> Result<Score> {
        self.individual_to_music(&Individual::new(grid), file)
    }

    /// Read every file and build a population from the encoded melodies
    pub fn generate_population<P, F>(&self, files: &[P], fitness: F) -> Result<Population<F>>
    where
        P: AsRef<Path>,
        F: FitFunction,
    {
        if files.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let members = files
            .iter()
            .map(|file| self.music_to_grid(file).map(Individual::new))
            .collect::<Result<Vec<_>>>()?;

        Population::new(members, fitness, self.config.mutation_rate)
    }
}
