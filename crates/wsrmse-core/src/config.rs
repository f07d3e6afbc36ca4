use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::outputs::OutputFormat;
use crate::rmse::{BucketPolicy, MAX_LEAD, MAX_LEAD_CEILING};

pub const DEFAULT_INPUT_DIR: &str = "/tmp/wsdata";
pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/wsrmse/WindSpeedRMSE.json";

/// Run settings. Precedence, lowest first: built-in defaults, TOML file,
/// `WSRMSE_*` environment variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_dir: PathBuf,
    /// Glob applied inside `input_dir`.
    pub input_pattern: String,
    pub output_path: PathBuf,
    /// Inferred from the output extension when unset.
    pub output_format: Option<OutputFormat>,
    pub max_lead: u32,
    pub bucket_policy: BucketPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            input_pattern: "*".to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_format: None,
            max_lead: MAX_LEAD,
            bucket_policy: BucketPolicy::default(),
        }
    }
}

impl Config {
    /// Defaults, then the optional TOML file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| PipelineError::io(path, err))?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `WSRMSE_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("WSRMSE_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(pattern) = lookup("WSRMSE_INPUT_PATTERN") {
            self.input_pattern = pattern;
        }
        if let Some(output) = lookup("WSRMSE_OUTPUT_PATH") {
            self.output_path = PathBuf::from(output);
        }
        if let Some(format) = lookup("WSRMSE_OUTPUT_FORMAT") {
            self.output_format = Some(format.parse().map_err(PipelineError::Config)?);
        }
        if let Some(max_lead) = lookup("WSRMSE_MAX_LEAD") {
            self.max_lead = max_lead.trim().parse().map_err(|_| {
                PipelineError::Config(format!("WSRMSE_MAX_LEAD must be an integer, got '{max_lead}'"))
            })?;
        }
        if let Some(policy) = lookup("WSRMSE_BUCKET_POLICY") {
            self.bucket_policy = policy.parse().map_err(PipelineError::Config)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_lead == 0 || self.max_lead > MAX_LEAD_CEILING {
            return Err(PipelineError::Config(format!(
                "max_lead must be between 1 and {MAX_LEAD_CEILING}, got {}",
                self.max_lead
            )));
        }
        if self.input_pattern.trim().is_empty() {
            return Err(PipelineError::Config(
                "input_pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolved_output_format(&self) -> OutputFormat {
        self.output_format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output_path))
    }
}
