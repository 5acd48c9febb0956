//! The mu+lambda generational loop tying the operators together.

use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{CatalogError, ConfigError, OptimizerConfig, ZoneCatalog};

use super::fitness::{EvaluationError, Evaluator};
use super::generator::{GenerateError, PlanGenerator};
use super::mopo::MopoArchive;
use super::pareto::ParetoAccumulator;
use super::plan::Candidate;
use super::ranking;
use super::selection;
use super::variation::PlanRng;

/// Fatal optimizer failures. Everything here aborts before or during
/// population construction; per-offspring rejections inside the loop are soft
/// and land in [`RunStats`] instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("Could not build a usable initial plan: {0}")]
    InitialEvaluation(EvaluationError),
}

/// Per-generation progress snapshot handed to the run callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation just completed (1-based; 0 is the initial population).
    pub generation: usize,
    /// Best aggregate score in the retained population.
    pub best_aggregate: f64,
    /// Mean aggregate score in the retained population.
    pub mean_aggregate: f64,
    /// Offspring accepted into the pool this generation.
    pub accepted_offspring: usize,
    /// Variation attempts spent this generation.
    pub attempts: usize,
    /// True when the attempt cap expired before the offspring quota was met.
    pub exhausted: bool,
}

/// Counters accumulated over a whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Generations completed.
    pub generations: usize,
    /// Fitness evaluations performed (initial population included).
    pub evaluations: u64,
    /// Offspring discarded for density violations.
    pub invalid_discarded: u64,
    /// Offspring discarded for a non-positive aggregate.
    pub degenerate_discarded: u64,
    /// Generations that ran out of attempts before filling the quota.
    pub exhausted_generations: usize,
    /// Wall-clock duration of the run.
    pub elapsed_seconds: f64,
}

/// Everything a reporting collaborator needs at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Final retained population.
    pub population: Vec<Candidate>,
    /// Accumulated per-objective-pair score history.
    pub pareto: ParetoAccumulator,
    /// Best-ever plans per objective and aggregate.
    pub mopo: MopoArchive,
    /// Run counters.
    pub stats: RunStats,
}

/// Runs the evolutionary search over a read-only zone catalog.
pub struct EvolutionEngine<'a> {
    catalog: &'a ZoneCatalog,
    config: &'a OptimizerConfig,
    rng: PlanRng,
}

impl<'a> EvolutionEngine<'a> {
    /// Validate the catalog and configuration once and set up the engine.
    pub fn new(catalog: &'a ZoneCatalog, config: &'a OptimizerConfig) -> Result<Self, EngineError> {
        catalog.validate()?;
        config.validate(catalog.objective_count())?;
        let rng = match config.random_seed {
            Some(seed) => PlanRng::new(seed),
            None => PlanRng::from_entropy(),
        };
        Ok(Self {
            catalog,
            config,
            rng,
        })
    }

    /// Run the configured number of generations.
    pub fn run(&mut self) -> Result<RunResult, EngineError> {
        self.run_with_callback(|_| {})
    }

    /// Run with a per-generation progress callback.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<RunResult, EngineError>
    where
        F: FnMut(&GenerationReport),
    {
        let start = Instant::now();
        let evaluator = Evaluator::new(self.catalog, self.config);
        let mut stats = RunStats::default();
        let mut pareto = ParetoAccumulator::new(self.catalog.objective_count());
        let mut mopo = MopoArchive::new(self.catalog.objective_count());

        let mut population = self.initial_population(&evaluator, &mut stats)?;
        info!(
            "initial population of {} plans created, entering the loop",
            population.len()
        );
        pareto.observe(&population);
        mopo.update(&population);
        callback(&report(0, &population, 0, 0, false));

        for generation in 1..=self.config.generations {
            let (offspring, attempts, exhausted) =
                self.breed(&population, &evaluator, &mut stats);
            let accepted = offspring.len();
            if exhausted {
                warn!(
                    "generation {}: offspring quota exhausted after {} attempts ({} of {} accepted)",
                    generation,
                    attempts,
                    accepted,
                    self.config.population_size
                );
                stats.exhausted_generations += 1;
            }

            // mu+lambda: pool parents with offspring, retain the best ranked.
            let mut pool = population;
            pool.extend(offspring);
            population = ranking::select_survivors(pool, self.config.population_size);

            pareto.observe(&population);
            mopo.update(&population);
            stats.generations = generation;

            let snapshot = report(generation, &population, accepted, attempts, exhausted);
            info!(
                "generation {} complete: best aggregate {:.3}, {} offspring accepted",
                generation, snapshot.best_aggregate, accepted
            );
            callback(&snapshot);
        }

        stats.elapsed_seconds = start.elapsed().as_secs_f64();
        Ok(RunResult {
            population,
            pareto,
            mopo,
            stats,
        })
    }

    /// Build and evaluate the initial population. Plans are generated
    /// sequentially (the RNG is shared) and evaluated in parallel; rejected
    /// plans are regenerated one at a time.
    fn initial_population(
        &mut self,
        evaluator: &Evaluator<'a>,
        stats: &mut RunStats,
    ) -> Result<Vec<Candidate>, EngineError> {
        let generator = PlanGenerator::new(self.catalog, self.config);

        let mut plans = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            plans.push(generator.generate(&mut self.rng)?);
        }

        let results: Vec<_> = plans
            .into_par_iter()
            .map(|plan| evaluator.evaluate(plan))
            .collect();
        stats.evaluations += results.len() as u64;

        let mut population = Vec::with_capacity(self.config.population_size);
        for result in results {
            match result {
                Ok(candidate) => population.push(candidate),
                Err(err) => {
                    warn!("initial plan rejected ({}), regenerating", err);
                    population.push(self.regenerate(&generator, evaluator, stats)?);
                }
            }
        }
        Ok(population)
    }

    fn regenerate(
        &mut self,
        generator: &PlanGenerator<'a>,
        evaluator: &Evaluator<'a>,
        stats: &mut RunStats,
    ) -> Result<Candidate, EngineError> {
        let mut last_error = None;
        for _ in 0..self.config.max_generation_attempts {
            let plan = generator.generate(&mut self.rng)?;
            stats.evaluations += 1;
            match evaluator.evaluate(plan) {
                Ok(candidate) => return Ok(candidate),
                Err(err) => last_error = Some(err),
            }
        }
        Err(EngineError::InitialEvaluation(last_error.unwrap_or(
            EvaluationError::DegenerateFitness { aggregate: 0.0 },
        )))
    }

    /// Produce one generation's offspring. Each attempt routes a single
    /// uniform draw to crossover, mutation or reproduction; offspring whose
    /// allocation changed are re-evaluated, and invalid or degenerate ones are
    /// discarded without counting toward the quota.
    fn breed(
        &mut self,
        parents: &[Candidate],
        evaluator: &Evaluator<'a>,
        stats: &mut RunStats,
    ) -> (Vec<Candidate>, usize, bool) {
        let quota = self.config.population_size;
        let p_crossover = self.config.crossover_probability;
        let p_mutation = self.config.mutation_probability;

        let mut offspring = Vec::with_capacity(quota);
        let mut attempts = 0usize;

        while offspring.len() < quota && attempts < self.config.max_offspring_attempts {
            attempts += 1;
            let draw = self.rng.uniform();

            let child = if draw < p_crossover {
                let picks = selection::roulette(parents, 2, &mut self.rng);
                let (first, _) =
                    self.rng
                        .crossover(&parents[picks[0]].plan, &parents[picks[1]].plan);
                stats.evaluations += 1;
                evaluator.evaluate(first)
            } else if draw < p_crossover + p_mutation {
                let pick = selection::roulette(parents, 1, &mut self.rng)[0];
                let mutated = self
                    .rng
                    .mutate(&parents[pick].plan, self.config.element_mutation_probability);
                stats.evaluations += 1;
                evaluator.evaluate(mutated)
            } else {
                // Reproduction: allocation unchanged, derived state kept.
                let pick = selection::roulette(parents, 1, &mut self.rng)[0];
                Ok(parents[pick].clone())
            };

            match child {
                Ok(candidate) if candidate.is_valid() => offspring.push(candidate),
                Ok(candidate) => {
                    stats.invalid_discarded += 1;
                    debug!(
                        "offspring discarded: density violation in zone {}",
                        candidate.violation.expect("invalid candidate").zone
                    );
                }
                Err(err) => {
                    stats.degenerate_discarded += 1;
                    debug!("offspring discarded: {}", err);
                }
            }
        }

        let exhausted = offspring.len() < quota;
        (offspring, attempts, exhausted)
    }
}

fn report(
    generation: usize,
    population: &[Candidate],
    accepted_offspring: usize,
    attempts: usize,
    exhausted: bool,
) -> GenerationReport {
    let best_aggregate = population
        .iter()
        .map(|c| c.aggregate)
        .fold(f64::INFINITY, f64::min);
    let mean_aggregate =
        population.iter().map(|c| c.aggregate).sum::<f64>() / population.len().max(1) as f64;
    GenerationReport {
        generation,
        best_aggregate,
        mean_aggregate,
        accepted_offspring,
        attempts,
        exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Zone;

    fn catalog() -> ZoneCatalog {
        let zones = (0..12)
            .map(|i| Zone {
                area_ha: 8.0 + i as f64 * 3.0,
                existing_density: (i % 4) as f64 * 5.0,
                scores: vec![
                    0.1 + i as f64 * 0.07,
                    1.0 - i as f64 * 0.05,
                    0.3 + (i % 3) as f64 * 0.2,
                ],
            })
            .collect();
        ZoneCatalog {
            objective_names: vec!["hazard".into(), "distance".into(), "restriction".into()],
            zones,
        }
    }

    fn config() -> OptimizerConfig {
        OptimizerConfig {
            population_size: 8,
            generations: 5,
            required_dwellings: 2_000,
            target_densities: vec![40.0, 60.0, 80.0],
            min_density: 0.0,
            max_density: 140.0,
            objective_weights: vec![1.0 / 3.0; 3],
            random_seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn run_completes_configured_generations() {
        let catalog = catalog();
        let config = config();
        let mut engine = EvolutionEngine::new(&catalog, &config).unwrap();

        let result = engine.run().unwrap();
        assert_eq!(result.stats.generations, 5);
        assert_eq!(result.population.len(), 8);
        assert!(result.stats.evaluations >= 8);
        for candidate in &result.population {
            assert_eq!(candidate.objectives.len(), 3);
            assert!(candidate.aggregate > 0.0);
        }
    }

    #[test]
    fn callback_sees_every_generation() {
        let catalog = catalog();
        let config = config();
        let mut engine = EvolutionEngine::new(&catalog, &config).unwrap();

        let mut seen = Vec::new();
        engine
            .run_with_callback(|r| seen.push(r.generation))
            .unwrap();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn mopo_sequences_stay_monotone_across_a_run() {
        let catalog = catalog();
        let config = config();
        let mut engine = EvolutionEngine::new(&catalog, &config).unwrap();

        let result = engine.run().unwrap();
        for m in 0..catalog.objective_count() {
            let sequence = result.mopo.objective_sequence(m);
            assert!(!sequence.is_empty());
            for window in sequence.windows(2) {
                assert!(window[1].score <= window[0].score);
            }
        }
    }

    #[test]
    fn pareto_history_accumulates() {
        let catalog = catalog();
        let config = config();
        let mut engine = EvolutionEngine::new(&catalog, &config).unwrap();

        let result = engine.run().unwrap();
        assert_eq!(result.pareto.pairs().len(), 3);
        for k in 0..result.pareto.pairs().len() {
            assert!(!result.pareto.points(k).is_empty());
            assert!(!result.pareto.front_of(k).is_empty());
        }
    }

    #[test]
    fn impossible_bounds_exhaust_offspring_softly() {
        let catalog = catalog();
        let config = OptimizerConfig {
            // No child can land in [139, 140] dw/ha, so every generation runs
            // out of attempts and proceeds short.
            min_density: 139.0,
            max_density: 140.0,
            target_densities: vec![20.0],
            generations: 2,
            max_offspring_attempts: 40,
            ..config()
        };
        let mut engine = EvolutionEngine::new(&catalog, &config).unwrap();

        let result = engine.run().unwrap();
        assert_eq!(result.stats.exhausted_generations, 2);
        assert_eq!(result.population.len(), config.population_size);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let catalog = catalog();
        let config = config();

        let first = EvolutionEngine::new(&catalog, &config)
            .unwrap()
            .run()
            .unwrap();
        let second = EvolutionEngine::new(&catalog, &config)
            .unwrap()
            .run()
            .unwrap();

        let firsts: Vec<f64> = first.population.iter().map(|c| c.aggregate).collect();
        let seconds: Vec<f64> = second.population.iter().map(|c| c.aggregate).collect();
        assert_eq!(firsts, seconds);
    }
}
