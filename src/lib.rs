pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{local::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{etl::ReconEngine, pipeline::LogReconPipeline, ReconSummary};
pub use crate::utils::error::{ReconError, Result};
