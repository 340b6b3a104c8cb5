// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fitness evaluation.

use super::Individual;
use crate::codec::Cell;
use crate::music::Scale;

/// Scores an individual; higher is fitter
pub trait FitFunction {
    fn evaluate(&self, individual: &Individual) -> f64;
}

/// Rewards in-key notes and penalizes large leaps.
///
/// The score is the share of notes inside the scale minus the share of
/// note-to-note intervals wider than `max_leap` semitones, so it lies in
/// `[-1, 1]`. A melody without notes scores 0.
#[derive(Debug, Clone)]
pub struct ScaleFitness {
    scale: Scale,
    max_leap: u8,
}

impl ScaleFitness {
    /// Create an evaluator for a scale and leap limit
    pub fn new(scale: Scale, max_leap: u8) -> Self {
        Self { scale, max_leap }
    }
}

impl Default for ScaleFitness {
    fn default() -> Self {
        Self::new(Scale::c_major(), 12)
    }
}

impl FitFunction for ScaleFitness {
    fn evaluate(&self, individual: &Individual) -> f64 {
        // Unresolvable names count as out of key
        let pitches: Vec<Option<u8>> = individual
            .melody
            .cells()
            .filter_map(|cell| match cell {
                Cell::Value(pitch) => Some(pitch.to_midi().ok()),
                Cell::Extend => None,
            })
            .collect();

        if pitches.is_empty() {
            return 0.0;
        }

        let in_key = pitches
            .iter()
            .filter(|p| p.map_or(false, |m| self.scale.contains_midi(m)))
            .count();
        let mut score = in_key as f64 / pitches.len() as f64;

        if pitches.len() > 1 {
            let leaps = pitches
                .windows(2)
                .filter(|w| match (w[0], w[1]) {
                    (Some(a), Some(b)) => a.abs_diff(b) > self.max_leap,
                    _ => false,
                })
                .count();
            score -= leaps as f64 / (pitches.len() - 1) as f64;
        }

        score
    }
}

impl<F: Fn(&Individual) -> f64> FitFunction for F {
    fn evaluate(&self, individual: &Individual) -> f64 {
        self(individual)
    }
}
