use crate::config::{DEFAULT_API_ENDPOINT, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::domain::model::CompilationLevel;
use crate::utils::error::{MinifyError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: Option<PipelineInfo>,
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub minify: MinifySection,
    #[serde(default)]
    pub output: OutputSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub input_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinifySection {
    pub endpoint: Option<String>,
    pub compilation_level: Option<CompilationLevel>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MinifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MinifyError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLOSURE_ENDPOINT})
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.minify.endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn input_file(&self) -> &str {
        self.source.input_file.as_deref().unwrap_or(DEFAULT_INPUT_FILE)
    }

    fn output_file(&self) -> &str {
        self.output.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    fn compilation_level(&self) -> CompilationLevel {
        self.minify.compilation_level.unwrap_or_default()
    }

    fn timeout_seconds(&self) -> u64 {
        self.minify.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("minify.endpoint", self.api_endpoint())?;
        validation::validate_path("source.input_file", self.input_file())?;
        validation::validate_path("output.output_file", self.output_file())?;
        validation::validate_positive_number("minify.timeout_seconds", self.timeout_seconds(), 1)?;
        Ok(())
    }
}
