//! Configuration and catalog types for the optimizer.

mod config;
mod zone;

pub use config::{ConfigError, OptimizerConfig};
pub use zone::{CatalogError, Zone, ZoneCatalog};
