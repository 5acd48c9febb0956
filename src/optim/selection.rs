//! Roulette-wheel parent selection.

use super::plan::Candidate;
use super::variation::PlanRng;

/// Select `k` candidate indices by fitness-proportionate roulette.
///
/// Scores are minimized, so each candidate is weighted by the reciprocal of
/// its aggregate fitness and lower scores take a larger share of the wheel.
/// Aggregates are guaranteed positive by evaluation, so the weights are always
/// defined. Draws are independent; the same index can be selected repeatedly.
pub fn roulette(population: &[Candidate], k: usize, rng: &mut PlanRng) -> Vec<usize> {
    if population.is_empty() {
        return Vec::new();
    }

    let weights: Vec<f64> = population.iter().map(|c| 1.0 / c.aggregate).collect();
    let total: f64 = weights.iter().sum();

    let mut selected = Vec::with_capacity(k);
    for _ in 0..k {
        let threshold = rng.uniform() * total;
        let mut rolling = 0.0;
        let mut winner = population.len() - 1;
        for (index, weight) in weights.iter().enumerate() {
            rolling += weight;
            if rolling > threshold {
                winner = index;
                break;
            }
        }
        selected.push(winner);
    }
    selected
}
