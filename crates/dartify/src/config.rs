//! Run configuration
//!
//! A `DartifyConfig` can be built in code or loaded from a TOML file:
//!
//! ```toml
//! input_dir = "node_modules/ol"
//! output_dir = "lib/src/interop"
//! exclude = ["lib.", "vendor."]
//! aggregators = true
//! ```
//!
//! Every key is optional; command-line arguments override the directories.

use crate::diagnostics::{DartifyError, DartifyResult};
use crate::symbols::{PlatformFilter, DEFAULT_PLATFORM_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration of a transpilation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DartifyConfig {
    /// Root of the `.d.ts` tree
    pub input_dir: Option<PathBuf>,
    /// Root of the generated Dart tree
    pub output_dir: Option<PathBuf>,
    /// File-name prefixes of platform declaration files
    pub exclude: Vec<String>,
    /// Whether to write folder and root aggregator files
    pub aggregators: bool,
    /// Generate in memory only
    pub dry_run: bool,
}

impl Default for DartifyConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            exclude: vec![DEFAULT_PLATFORM_PREFIX.to_string()],
            aggregators: true,
            dry_run: false,
        }
    }
}

impl DartifyConfig {
    /// Create a configuration for an input and output directory
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self::default().input_dir(input_dir).output_dir(output_dir)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> DartifyResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> DartifyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DartifyError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Set the input directory
    pub fn input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(path.into());
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Replace the platform file prefixes
    pub fn exclude<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable aggregator files
    pub fn aggregators(mut self, enable: bool) -> Self {
        self.aggregators = enable;
        self
    }

    /// Enable or disable dry-run mode
    pub fn dry_run(mut self, enable: bool) -> Self {
        self.dry_run = enable;
        self
    }

    /// Platform filter built from `exclude`
    pub fn platform_filter(&self) -> PlatformFilter {
        PlatformFilter::new(self.exclude.iter().cloned())
    }

    /// Check that both directories are set and return them
    pub fn validate(&self) -> DartifyResult<(&Path, &Path)> {
        let input = self
            .input_dir
            .as_deref()
            .ok_or_else(|| DartifyError::config("input_dir is not set"))?;
        let output = self
            .output_dir
            .as_deref()
            .ok_or_else(|| DartifyError::config("output_dir is not set"))?;
        Ok((input, output))
    }
}
