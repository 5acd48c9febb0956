//! Run configuration for the spatial development optimizer.

use serde::{Deserialize, Serialize};

/// Top-level optimizer configuration.
///
/// All probabilities are expressed in `[0, 1]`; densities in dwellings per
/// hectare. The objective weight vector folds the per-objective scores into
/// the scalar aggregate used by roulette selection. Pareto ranking treats the
/// objectives independently of these weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Number of development plans retained per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of generations to run.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Probability of producing an offspring by two-point crossover.
    #[serde(default = "default_crossover_probability")]
    pub crossover_probability: f64,
    /// Probability of producing an offspring by shuffle mutation.
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,
    /// Per-position selection probability inside a mutation.
    #[serde(default = "default_element_mutation_probability")]
    pub element_mutation_probability: f64,
    /// Total dwellings each plan must allocate across the region.
    pub required_dwellings: u32,
    /// Acceptable target densities for newly developed zones. When empty, the
    /// generator draws a uniform density under the remaining headroom instead.
    #[serde(default = "default_target_densities")]
    pub target_densities: Vec<f64>,
    /// Minimum resulting density for a zone that receives dwellings.
    #[serde(default = "default_min_density")]
    pub min_density: f64,
    /// Maximum resulting density for any developed zone.
    #[serde(default = "default_max_density")]
    pub max_density: f64,
    /// Weight per objective when folding scores into the aggregate.
    pub objective_weights: Vec<f64>,
    /// Attempt cap when constructing one initial plan.
    #[serde(default = "default_attempt_cap")]
    pub max_generation_attempts: usize,
    /// Attempt cap when filling one generation's offspring quota.
    #[serde(default = "default_attempt_cap")]
    pub max_offspring_attempts: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_population_size() -> usize {
    10
}
fn default_generations() -> usize {
    10
}
fn default_crossover_probability() -> f64 {
    0.7
}
fn default_mutation_probability() -> f64 {
    0.2
}
fn default_element_mutation_probability() -> f64 {
    0.05
}
fn default_target_densities() -> Vec<f64> {
    vec![83.0, 92.0, 111.0, 133.0]
}
fn default_min_density() -> f64 {
    25.0
}
fn default_max_density() -> f64 {
    140.0
}
fn default_attempt_cap() -> usize {
    1000
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            crossover_probability: default_crossover_probability(),
            mutation_probability: default_mutation_probability(),
            element_mutation_probability: default_element_mutation_probability(),
            required_dwellings: 50_000,
            target_densities: default_target_densities(),
            min_density: default_min_density(),
            max_density: default_max_density(),
            objective_weights: vec![1.0 / 6.0; 6],
            max_generation_attempts: default_attempt_cap(),
            max_offspring_attempts: default_attempt_cap(),
            random_seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Number of objectives implied by the weight vector.
    #[inline]
    pub fn objective_count(&self) -> usize {
        self.objective_weights.len()
    }

    /// Validate the run preconditions once, before the run starts.
    pub fn validate(&self, objective_count: usize) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.required_dwellings == 0 {
            return Err(ConfigError::NoDwellings);
        }
        for (name, p) in [
            ("crossover", self.crossover_probability),
            ("mutation", self.mutation_probability),
            ("element mutation", self.element_mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    which: name,
                    value: p,
                });
            }
        }
        if self.crossover_probability + self.mutation_probability > 1.0 {
            return Err(ConfigError::OperatorMassExceedsOne {
                sum: self.crossover_probability + self.mutation_probability,
            });
        }
        if self.min_density > self.max_density {
            return Err(ConfigError::InvertedDensityBounds {
                min: self.min_density,
                max: self.max_density,
            });
        }
        if let Some(&largest) = self.target_densities.iter().max_by(|a, b| a.total_cmp(b)) {
            if largest > self.max_density {
                return Err(ConfigError::TargetDensityAboveCeiling {
                    target: largest,
                    max: self.max_density,
                });
            }
        }
        if self.objective_weights.len() != objective_count {
            return Err(ConfigError::WeightCountMismatch {
                weights: self.objective_weights.len(),
                objectives: objective_count,
            });
        }
        if self
            .objective_weights
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ConfigError::InvalidWeight);
        }
        if self.objective_weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::ZeroWeightMass);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Generation count must be non-zero")]
    NoGenerations,
    #[error("Required dwelling total must be non-zero")]
    NoDwellings,
    #[error("{which} probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { which: &'static str, value: f64 },
    #[error("Crossover + mutation probability {sum} exceeds 1")]
    OperatorMassExceedsOne { sum: f64 },
    #[error("Minimum density {min} exceeds maximum density {max}")]
    InvertedDensityBounds { min: f64, max: f64 },
    #[error("Target density {target} exceeds the maximum density {max}")]
    TargetDensityAboveCeiling { target: f64, max: f64 },
    #[error("{weights} objective weights supplied but the catalog scores {objectives} objectives")]
    WeightCountMismatch { weights: usize, objectives: usize },
    #[error("Objective weights must be finite and non-negative")]
    InvalidWeight,
    #[error("Objective weights must not all be zero")]
    ZeroWeightMass,
}
