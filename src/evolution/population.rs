// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Populations of melody candidates.

use rand::Rng;
use tracing::{debug, info};

use super::{FitFunction, Individual};
use crate::error::{CodecError, Result};

/// Individuals with cached fitness scores
pub struct Population<F: FitFunction> {
    members: Vec<Individual>,
    fitness: F,
    mutation_rate: f64,
    /// Fitness of each member, same order as `members`
    scores: Vec<f64>,
}

impl<F: FitFunction> Population<F> {
    /// Create a population and score every member.
    ///
    /// Fails with [`CodecError::EmptyInput`] when `members` is empty.
    pub fn new(members: Vec<Individual>, fitness: F, mutation_rate: f64) -> Result<Self> {
        if members.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let scores = members.iter().map(|m| fitness.evaluate(m)).collect();
        let population = Self {
            members,
            fitness,
            mutation_rate,
            scores,
        };

        info!(
            members = population.members.len(),
            mutation_rate, "created population"
        );
        Ok(population)
    }

    /// Get members
    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the population has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Fitness of every member, in member order
    pub fn adaptability(&self) -> &[f64] {
        &self.scores
    }

    /// Get the mutation rate
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Get the fitness evaluator
    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// The fittest member and its score (first one on ties)
    pub fn best(&self) -> Option<(&Individual, f64)> {
        self.members
            .iter()
            .zip(self.scores.iter().copied())
            .fold(None, |best, (member, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((member, score)),
            })
    }

    /// Mutate every member at the population's rate and rescore
    pub fn mutate_all<R: Rng>(&mut self, rng: &mut R) -> Result<usize> {
        let mut changed = 0;
        for member in &mut self.members {
            changed += member.mutate(self.mutation_rate, rng)?;
        }

        self.scores = self.members.iter().map(|m| self.fitness.evaluate(m)).collect();
        debug!(changed, "mutated population");
        Ok(changed)
    }
}
