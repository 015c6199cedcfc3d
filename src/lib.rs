pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::pipelines::MenuPipeline;
pub use config::toml_config::TomlConfig;
pub use crate::core::etl::EtlEngine;
pub use utils::error::{Result, VegError};
