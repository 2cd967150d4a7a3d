pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::CompilationLevel;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

// Defaults match the fixed values the tool originally shipped with.
pub const DEFAULT_INPUT_FILE: &str = "irid.js";
pub const DEFAULT_OUTPUT_FILE: &str = "irid.min.js";
pub const DEFAULT_API_ENDPOINT: &str = "http://closure-compiler.appspot.com/compile";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "closure-minify")]
#[command(about = "Minify a JavaScript file via the Closure Compiler web service")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_INPUT_FILE)]
    pub input_file: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, value_enum, default_value = "simple")]
    pub compilation_level: CompilationLevel,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn compilation_level(&self) -> CompilationLevel {
        self.compilation_level
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("input_file", &self.input_file)?;
        validation::validate_path("output_file", &self.output_file)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
