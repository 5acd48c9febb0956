//! Evolutionary optimizer core.
//!
//! The pieces compose bottom-up: [`plan`] holds allocations and evaluated
//! candidates, [`generator`] and [`fitness`] produce them, [`variation`] and
//! [`selection`] drive the search, [`ranking`] retains survivors, and
//! [`pareto`] and [`mopo`] keep the cross-run record. [`engine`] ties it all
//! into the generational loop.

pub mod constraints;
pub mod engine;
pub mod fitness;
pub mod generator;
pub mod mopo;
pub mod pareto;
pub mod plan;
pub mod ranking;
pub mod selection;
pub mod variation;

pub use constraints::{first_violation, DensityViolation};
pub use engine::{EngineError, EvolutionEngine, GenerationReport, RunResult, RunStats};
pub use fitness::{EvaluationError, Evaluator};
pub use generator::{GenerateError, PlanGenerator};
pub use mopo::{MopoArchive, MopoEntry};
pub use pareto::{dominates, front, PairPoint, ParetoAccumulator};
pub use plan::{Candidate, Plan};
pub use ranking::select_survivors;
pub use selection::roulette;
pub use variation::PlanRng;
