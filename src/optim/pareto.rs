//! Pareto dominance, front extraction and the per-pair score accumulator.
//!
//! All objectives are minimized. Dominance is the canonical non-strict rule:
//! `a` dominates `b` iff `a` is no worse in every objective and strictly
//! better in at least one, so exact ties survive onto the front.

use serde::{Deserialize, Serialize};

use super::plan::{Candidate, Plan};

/// True iff `a` dominates `b` (minimization).
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Indices of the non-dominated points in `points`.
///
/// Each point is scanned against every other and drops out at its first
/// dominator. Empty and single-point inputs come back unchanged. O(n²), which
/// is fine at the accumulated-set sizes seen here; re-extraction from scratch
/// on every request is the known scaling limit.
pub fn front<P: AsRef<[f64]>>(points: &[P]) -> Vec<usize> {
    let mut kept = Vec::new();
    'candidates: for (i, x) in points.iter().enumerate() {
        for (j, y) in points.iter().enumerate() {
            if i != j && dominates(y.as_ref(), x.as_ref()) {
                continue 'candidates;
            }
        }
        kept.push(i);
    }
    kept
}

/// One observed score point for an objective pair, with the plan that scored
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPoint {
    pub x: f64,
    pub y: f64,
    pub plan: Plan,
}

impl PairPoint {
    #[inline]
    fn scores(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Accumulated, deduplicated score pairs for every unordered objective pair.
///
/// Grows monotonically across generations; front extraction runs lazily over
/// the accumulated history of a pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParetoAccumulator {
    pairs: Vec<(usize, usize)>,
    points: Vec<Vec<PairPoint>>,
}

impl ParetoAccumulator {
    /// Set up the accumulator for `objective_count` objectives: one bucket per
    /// unordered pair `(i, j)` with `i < j`.
    pub fn new(objective_count: usize) -> Self {
        let mut pairs = Vec::new();
        for i in 0..objective_count {
            for j in (i + 1)..objective_count {
                pairs.push((i, j));
            }
        }
        let points = vec![Vec::new(); pairs.len()];
        Self { pairs, points }
    }

    /// The unordered objective pairs, in bucket order.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// All observed points for pair bucket `k`.
    pub fn points(&self, k: usize) -> &[PairPoint] {
        &self.points[k]
    }

    /// Record every candidate's score pair in every bucket, skipping exact
    /// duplicates of already observed points.
    pub fn observe(&mut self, population: &[Candidate]) {
        for candidate in population {
            for (bucket, &(i, j)) in self.pairs.iter().enumerate() {
                let (x, y) = (candidate.objectives[i], candidate.objectives[j]);
                let seen = self.points[bucket].iter().any(|p| p.x == x && p.y == y);
                if !seen {
                    self.points[bucket].push(PairPoint {
                        x,
                        y,
                        plan: candidate.plan.clone(),
                    });
                }
            }
        }
    }

    /// The non-dominated subset of pair bucket `k`.
    pub fn front_of(&self, k: usize) -> Vec<&PairPoint> {
        let scores: Vec<[f64; 2]> = self.points[k].iter().map(PairPoint::scores).collect();
        front(&scores)
            .into_iter()
            .map(|i| &self.points[k][i])
            .collect()
    }

    /// Distinct plans that are on the front of at least one objective pair.
    pub fn distinct_front_plans(&self) -> usize {
        let mut plans: Vec<&Plan> = Vec::new();
        for k in 0..self.pairs.len() {
            for point in self.front_of(k) {
                if !plans.iter().any(|p| **p == point.plan) {
                    plans.push(&point.plan);
                }
            }
        }
        plans.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomparable_points_share_the_front() {
        // (1,5) and (5,1) trade off; (6,6) loses to both.
        let points = vec![[1.0, 5.0], [5.0, 1.0], [6.0, 6.0]];
        assert_eq!(front(&points), vec![0, 1]);
    }

    #[test]
    fn dominance_requires_strict_improvement_somewhere() {
        assert!(!dominates(&[2.0, 2.0], &[2.0, 2.0]));
        assert!(dominates(&[2.0, 1.0], &[2.0, 2.0]));
        assert!(!dominates(&[1.0, 3.0], &[2.0, 2.0]));
    }

    #[test]
    fn ties_are_retained() {
        let points = vec![[1.0, 1.0], [1.0, 1.0], [2.0, 2.0]];
        assert_eq!(front(&points), vec![0, 1]);
    }

    #[test]
    fn front_is_idempotent() {
        let points = vec![[1.0, 5.0], [3.0, 3.0], [5.0, 1.0], [4.0, 4.0], [2.0, 6.0]];
        let first: Vec<[f64; 2]> = front(&points).into_iter().map(|i| points[i]).collect();
        let second: Vec<[f64; 2]> = front(&first).into_iter().map(|i| first[i]).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_and_singleton_inputs_pass_through() {
        let none: Vec<[f64; 2]> = Vec::new();
        assert!(front(&none).is_empty());
        assert_eq!(front(&[[4.0, 2.0]]), vec![0]);
    }

    #[test]
    fn pair_enumeration_matches_objective_count() {
        let accumulator = ParetoAccumulator::new(6);
        assert_eq!(accumulator.pairs().len(), 15);
        assert_eq!(accumulator.pairs()[0], (0, 1));
        assert_eq!(accumulator.pairs()[14], (4, 5));
    }

    #[test]
    fn observe_deduplicates_exact_score_pairs() {
        let mut accumulator = ParetoAccumulator::new(2);
        let candidate = Candidate {
            plan: Plan {
                dwellings: vec![1, 2],
            },
            densities: vec![0.0, 0.0],
            violation: None,
            objectives: vec![3.0, 4.0],
            aggregate: 7.0,
        };
        accumulator.observe(&[candidate.clone(), candidate]);
        assert_eq!(accumulator.points(0).len(), 1);
    }
}
