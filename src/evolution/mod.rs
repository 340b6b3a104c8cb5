// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Genetic-algorithm surface for melody grids.
//!
//! An [`Individual`] owns a grid as its chromosome. A [`Population`] pairs
//! individuals with a [`FitFunction`] and a mutation rate.

pub mod fitness;
pub mod population;

pub use fitness::{FitFunction, ScaleFitness};
pub use population::Population;

use rand::Rng;

use crate::codec::{Cell, Grid};
use crate::error::Result;
use crate::music::{PitchRef, Scale};

/// Scale-degree steps a mutation may move a note by
const MUTATION_STEPS: [i32; 4] = [-2, -1, 1, 2];

/// A melody candidate
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub melody: Grid,
}

impl Individual {
    /// Wrap a grid
    pub fn new(melody: Grid) -> Self {
        Self { melody }
    }

    /// Move each note by one or two C-major scale degrees with probability
    /// `rate`. Extend cells are never touched, so the rhythm is preserved.
    ///
    /// Returns the number of notes changed.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) -> Result<usize> {
        if rate.is_nan() || rate <= 0.0 {
            return Ok(0);
        }
        let rate = rate.min(1.0);
        let scale = Scale::c_major();
        let mut changed = 0;

        // Every pitch must resolve before any cell is rewritten
        let resolved = self
            .melody
            .cells()
            .filter_map(|cell| match cell {
                Cell::Value(pitch) => Some(pitch.to_midi()),
                Cell::Extend => None,
            })
            .collect::<Result<Vec<_>>>()?;

        let values = self.melody.cells_mut().filter_map(|cell| match cell {
            Cell::Value(pitch) => Some(pitch),
            Cell::Extend => None,
        });
        for (pitch, midi) in values.zip(resolved) {
            if !rng.gen_bool(rate) {
                continue;
            }
            let step = MUTATION_STEPS[rng.gen_range(0..MUTATION_STEPS.len())];
            *pitch = PitchRef::Midi(scale.transpose_in_scale(midi, step));
            changed += 1;
        }

        Ok(changed)
    }
}

impl From<Grid> for Individual {
    fn from(melody: Grid) -> Self {
        Self::new(melody)
    }
}
