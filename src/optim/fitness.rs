//! Fitness evaluation of development plans.
//!
//! Evaluation is a pure function of (plan, catalog, config): per-zone
//! suitability scores are weighted by the dwellings added to that zone and
//! accumulated into one total per objective. The weighted sum of those totals
//! is the aggregate used by roulette selection; the Pareto machinery only ever
//! sees the unweighted objective vector.

use crate::schema::{OptimizerConfig, ZoneCatalog};

use super::constraints;
use super::plan::{Candidate, Plan};

/// Evaluation failures. Invalid plans are not errors (they carry their
/// violation on the candidate); a degenerate aggregate is, because it would
/// break the reciprocal roulette weight downstream.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Plan covers {plan} zones but the catalog holds {catalog}")]
    ZoneCountMismatch { plan: usize, catalog: usize },
    #[error("Aggregate fitness {aggregate} is not positive")]
    DegenerateFitness { aggregate: f64 },
}

/// Evaluates plans against a zone catalog.
pub struct Evaluator<'a> {
    catalog: &'a ZoneCatalog,
    config: &'a OptimizerConfig,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator borrowing the shared, read-only catalog.
    pub fn new(catalog: &'a ZoneCatalog, config: &'a OptimizerConfig) -> Self {
        Self { catalog, config }
    }

    /// Evaluate a plan into a fully derived candidate.
    ///
    /// Computes resulting densities, the density-bound check and the objective
    /// vector in one pass over the allocation. Rejects plans whose aggregate
    /// fitness is not strictly positive.
    pub fn evaluate(&self, plan: Plan) -> Result<Candidate, EvaluationError> {
        if plan.len() != self.catalog.len() {
            return Err(EvaluationError::ZoneCountMismatch {
                plan: plan.len(),
                catalog: self.catalog.len(),
            });
        }

        let objective_count = self.catalog.objective_count();
        let mut densities = Vec::with_capacity(plan.len());
        let mut objectives = vec![0.0; objective_count];

        for (index, &added) in plan.dwellings.iter().enumerate() {
            let zone = self.catalog.zone(index);
            densities.push(zone.existing_density + f64::from(added) / zone.area_ha);

            if added > 0 {
                let houses = f64::from(added);
                for (total, score) in objectives.iter_mut().zip(&zone.scores) {
                    *total += score * houses;
                }
            }
        }

        let aggregate = objectives
            .iter()
            .zip(&self.config.objective_weights)
            .map(|(score, weight)| score * weight)
            .sum::<f64>();
        if !(aggregate.is_finite() && aggregate > 0.0) {
            return Err(EvaluationError::DegenerateFitness { aggregate });
        }

        let violation = constraints::first_violation(
            &plan.dwellings,
            &densities,
            self.config.min_density,
            self.config.max_density,
        );

        Ok(Candidate {
            plan,
            densities,
            violation,
            objectives,
            aggregate,
        })
    }
}
