//! Plan and candidate types.
//!
//! A `Plan` is the bare allocation vector a genetic operator works on. A
//! `Candidate` is a plan evaluated against the catalog: resulting densities,
//! constraint status and objective scores all computed in one shot. Derived
//! state is never attached piecemeal; whenever an allocation changes, a fresh
//! `Candidate` is produced by [`Evaluator::evaluate`](super::Evaluator).

use serde::{Deserialize, Serialize};

use super::constraints::DensityViolation;

/// One development plan: dwellings added per zone, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Dwellings added to each zone.
    pub dwellings: Vec<u32>,
}

impl Plan {
    /// A plan allocating nothing to `zone_count` zones.
    pub fn zeroed(zone_count: usize) -> Self {
        Self {
            dwellings: vec![0; zone_count],
        }
    }

    /// Number of zones covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.dwellings.len()
    }

    /// True when the plan covers no zones.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dwellings.is_empty()
    }

    /// Total dwellings allocated across all zones.
    pub fn total_dwellings(&self) -> u64 {
        self.dwellings.iter().map(|&d| u64::from(d)).sum()
    }
}

/// A plan together with everything derived from its allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// The allocation itself.
    pub plan: Plan,
    /// Resulting density per zone (existing + added), in catalog order.
    pub densities: Vec<f64>,
    /// First density-bound violation, if any.
    pub violation: Option<DensityViolation>,
    /// One score per objective, lower = better.
    pub objectives: Vec<f64>,
    /// Weighted sum of the objective scores. Always positive for candidates
    /// that survive evaluation.
    pub aggregate: f64,
}

impl Candidate {
    /// True when the plan satisfies the density bounds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}
