//! Zone catalog: the static, pre-scored candidate development areas.
//!
//! The catalog is produced upstream (geometry clipping, hazard overlays and
//! accessibility scoring are out of scope here) and consumed read-only for the
//! whole run. Zones are addressed by their position in `zones`, which is
//! stable for the run's duration.

use serde::{Deserialize, Serialize};

/// One candidate development zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Developable area in hectares.
    pub area_ha: f64,
    /// Existing dwelling density (dwellings per hectare).
    pub existing_density: f64,
    /// Per-objective suitability scores, lower = better. One entry per
    /// objective, in catalog objective order.
    pub scores: Vec<f64>,
}

/// Fixed-order, read-only collection of zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCatalog {
    /// Objective names, e.g. tsunami exposure or amenity distance. The length
    /// fixes the objective count for the whole run.
    pub objective_names: Vec<String>,
    /// Zones in stable index order.
    pub zones: Vec<Zone>,
}

impl ZoneCatalog {
    /// Number of zones.
    #[inline]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// True when the catalog holds no zones.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Number of objectives scored per zone.
    #[inline]
    pub fn objective_count(&self) -> usize {
        self.objective_names.len()
    }

    /// Zone by index.
    #[inline]
    pub fn zone(&self, index: usize) -> &Zone {
        &self.zones[index]
    }

    /// Structural validation, run once before the optimizer starts.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.zones.is_empty() {
            return Err(CatalogError::Empty);
        }
        if self.objective_names.is_empty() {
            return Err(CatalogError::NoObjectives);
        }
        let expected = self.objective_names.len();
        for (index, zone) in self.zones.iter().enumerate() {
            if !(zone.area_ha.is_finite() && zone.area_ha > 0.0) {
                return Err(CatalogError::NonPositiveArea {
                    zone: index,
                    area: zone.area_ha,
                });
            }
            if !(zone.existing_density.is_finite() && zone.existing_density >= 0.0) {
                return Err(CatalogError::NegativeDensity {
                    zone: index,
                    density: zone.existing_density,
                });
            }
            if zone.scores.len() != expected {
                return Err(CatalogError::ScoreLengthMismatch {
                    zone: index,
                    expected,
                    found: zone.scores.len(),
                });
            }
            if let Some(objective) = zone.scores.iter().position(|s| !s.is_finite() || *s < 0.0) {
                return Err(CatalogError::InvalidScore {
                    zone: index,
                    objective,
                });
            }
        }
        Ok(())
    }
}

/// Catalog validation errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog holds no zones")]
    Empty,
    #[error("Catalog names no objectives")]
    NoObjectives,
    #[error("Zone {zone} has non-positive area {area}")]
    NonPositiveArea { zone: usize, area: f64 },
    #[error("Zone {zone} has negative existing density {density}")]
    NegativeDensity { zone: usize, density: f64 },
    #[error("Zone {zone} scores {found} objectives, catalog names {expected}")]
    ScoreLengthMismatch {
        zone: usize,
        expected: usize,
        found: usize,
    },
    #[error("Zone {zone} has a negative or non-finite score for objective {objective}")]
    InvalidScore { zone: usize, objective: usize },
}
