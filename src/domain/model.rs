use serde::{Deserialize, Serialize};
use std::fmt;

/// Optimization tier accepted by the Closure Compiler service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CompilationLevel {
    #[serde(rename = "WHITESPACE_ONLY")]
    WhitespaceOnly,
    #[default]
    #[serde(rename = "SIMPLE_OPTIMIZATIONS")]
    Simple,
    #[serde(rename = "ADVANCED_OPTIMIZATIONS")]
    Advanced,
}

impl CompilationLevel {
    /// Wire name the service expects in the `compilation_level` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilationLevel::WhitespaceOnly => "WHITESPACE_ONLY",
            CompilationLevel::Simple => "SIMPLE_OPTIMIZATIONS",
            CompilationLevel::Advanced => "ADVANCED_OPTIMIZATIONS",
        }
    }
}

impl fmt::Display for CompilationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: String,
    pub content: String,
}

impl SourceDocument {
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }
}

/// Outcome of one minification call, carried from transform to load.
#[derive(Debug, Clone)]
pub struct MinifyResult {
    pub code: String,
    pub original_len: usize,
    pub compilation_level: CompilationLevel,
}

impl MinifyResult {
    pub fn minified_len(&self) -> usize {
        self.code.len()
    }
}

#[derive(Debug, Clone)]
pub struct MinifyReport {
    pub original_len: usize,
    pub minified_len: usize,
    pub compilation_level: CompilationLevel,
    pub output_path: String,
}
