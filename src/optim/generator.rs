//! Initial plan construction.

use log::debug;

use crate::schema::{OptimizerConfig, ZoneCatalog};

use super::plan::Plan;
use super::variation::PlanRng;

/// Plan construction failure: the attempt cap was reached before the required
/// dwelling total could be placed.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(
        "Gave up after {attempts} attempts with {allocated} of {required} dwellings allocated"
    )]
    AttemptsExhausted {
        attempts: usize,
        allocated: u64,
        required: u64,
    },
}

/// Builds initial development plans that meet the required dwelling total.
pub struct PlanGenerator<'a> {
    catalog: &'a ZoneCatalog,
    config: &'a OptimizerConfig,
}

impl<'a> PlanGenerator<'a> {
    pub fn new(catalog: &'a ZoneCatalog, config: &'a OptimizerConfig) -> Self {
        Self { catalog, config }
    }

    /// Build one plan: repeatedly densify a random zone until the required
    /// dwelling total is met, clipping the final addition to close the gap
    /// exactly.
    ///
    /// Each pass picks a random zone and a target density under the zone's
    /// remaining headroom (from the acceptable set when one is configured,
    /// uniform below the headroom otherwise), then converts it to a dwelling
    /// count by the zone area, rounding toward zero. Draws that add nothing
    /// still consume an attempt, so the loop terminates even when every zone
    /// has reached the ceiling.
    pub fn generate(&self, rng: &mut PlanRng) -> Result<Plan, GenerateError> {
        let required = u64::from(self.config.required_dwellings);
        let mut plan = Plan::zeroed(self.catalog.len());
        let mut allocated: u64 = 0;
        let mut attempts = 0usize;

        while allocated < required {
            attempts += 1;
            if attempts > self.config.max_generation_attempts {
                return Err(GenerateError::AttemptsExhausted {
                    attempts: attempts - 1,
                    allocated,
                    required,
                });
            }

            let index = rng.index(self.catalog.len());
            let zone = self.catalog.zone(index);
            let committed = f64::from(plan.dwellings[index]) / zone.area_ha;
            let headroom = self.config.max_density - zone.existing_density - committed;
            if headroom <= 0.0 {
                continue;
            }

            let density = if self.config.target_densities.is_empty() {
                rng.density_below(headroom)
            } else {
                let fitting: Vec<f64> = self
                    .config
                    .target_densities
                    .iter()
                    .copied()
                    .filter(|d| *d <= headroom)
                    .collect();
                if fitting.is_empty() {
                    continue;
                }
                rng.choose(&fitting)
            };

            // Round toward zero: half a house is no house.
            let count = (density * zone.area_ha).floor() as u64;
            if count == 0 {
                continue;
            }

            if allocated + count < required {
                allocated += count;
                plan.dwellings[index] += count as u32;
            } else {
                // Overshoot: clip to close the remaining gap and stop.
                let gap = required - allocated;
                plan.dwellings[index] += gap as u32;
                allocated = required;
            }
        }

        debug!(
            "generated plan in {} attempts, {} dwellings",
            attempts, allocated
        );
        Ok(plan)
    }
}
