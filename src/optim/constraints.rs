//! Density-bound validation of development plans.

use serde::{Deserialize, Serialize};

/// A zone whose resulting density falls outside the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityViolation {
    /// Index of the offending zone.
    pub zone: usize,
    /// Resulting density (existing + added) in dwellings per hectare.
    pub resulting_density: f64,
}

/// Check each allocated zone's resulting density against `[min, max]`.
///
/// Zones with no allocation are exempt: an undeveloped zone keeps whatever
/// density it already had. The scan stops at the first violation.
pub fn first_violation(
    dwellings: &[u32],
    resulting_densities: &[f64],
    min_density: f64,
    max_density: f64,
) -> Option<DensityViolation> {
    debug_assert_eq!(dwellings.len(), resulting_densities.len());

    for (zone, (&added, &density)) in dwellings.iter().zip(resulting_densities).enumerate() {
        if added == 0 {
            continue;
        }
        if density < min_density || density > max_density {
            return Some(DensityViolation {
                zone,
                resulting_density: density,
            });
        }
    }
    None
}
