//! Urban Plan - Evolutionary allocation of new housing across zones.
//!
//! This crate searches for allocations of a required number of new dwellings
//! across a catalog of development zones, minimising several hazard and
//! suitability objectives at once with a mu+lambda evolutionary loop.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and zone catalog types
//! - `optim`: The optimizer (generation, fitness, variation, ranking, archives)
//!
//! # Example
//!
//! ```rust,no_run
//! use urban_plan::{
//!     optim::EvolutionEngine,
//!     schema::{OptimizerConfig, Zone, ZoneCatalog},
//! };
//!
//! // Three zones scored against two objectives
//! let catalog = ZoneCatalog {
//!     objective_names: vec!["flood".into(), "distance".into()],
//!     zones: vec![
//!         Zone { area_ha: 12.0, existing_density: 5.0, scores: vec![0.2, 0.8] },
//!         Zone { area_ha: 30.0, existing_density: 0.0, scores: vec![0.6, 0.1] },
//!         Zone { area_ha: 8.5, existing_density: 20.0, scores: vec![0.4, 0.4] },
//!     ],
//! };
//!
//! let config = OptimizerConfig {
//!     required_dwellings: 4_000,
//!     objective_weights: vec![0.5, 0.5],
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(&catalog, &config)?;
//! let result = engine.run()?;
//!
//! println!("best aggregate: {:.3}", result.mopo.best(0).unwrap().score);
//! # Ok::<(), urban_plan::optim::EngineError>(())
//! ```

pub mod optim;
pub mod schema;

// Re-export commonly used types
pub use optim::{Candidate, EvolutionEngine, Plan, RunResult, RunStats};
pub use schema::{OptimizerConfig, Zone, ZoneCatalog};
