pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use self::core::{engine::MinifyEngine, pipeline::MinifyPipeline};
pub use domain::model::{CompilationLevel, MinifyReport};
pub use utils::error::{MinifyError, Result};
