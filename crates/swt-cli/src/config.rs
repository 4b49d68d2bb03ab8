// crates/swt-cli/src/config.rs
//
// Runtime configuration for the swt CLI.
// Loaded from a TOML file or populated with sensible defaults.

use std::collections::HashMap;
use std::fs;

use serde::Deserialize;
use swt_model::{SwParams, TopSpacePolicy, WeightFunction};

use crate::error::CliError;
use crate::graph::NodeIndex;
use crate::output::OutputFormat;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwtConfig {
    /// Top-node weight function: "tanh", "simple", "inverse", or "own".
    #[serde(default = "default_weight_function")]
    pub weight_function: String,

    /// Per-top-node weights keyed by top-node name. Required when
    /// `weight_function = "own"`, ignored otherwise.
    #[serde(default)]
    pub own_weights: Option<HashMap<String, f64>>,

    /// Predict-time handling of top-node space mismatches: "strict" or "lenient".
    #[serde(default)]
    pub top_space: TopSpacePolicy,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format for predictions and reports: "table" or "json".
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_weight_function() -> String {
    "tanh".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SwtConfig {
    fn default() -> Self {
        Self {
            weight_function: default_weight_function(),
            own_weights: None,
            top_space: TopSpacePolicy::default(),
            log_level: default_log_level(),
            format: OutputFormat::default(),
        }
    }
}

impl SwtConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &str) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve estimator parameters against the training top-node vocabulary.
    ///
    /// Own weights are laid out in top-node index order; every top node must
    /// have an entry.
    pub fn params(&self, top: &NodeIndex) -> Result<SwParams, CliError> {
        let weight_function = if self.weight_function.trim().eq_ignore_ascii_case("own") {
            let own = self.own_weights.as_ref().ok_or_else(|| {
                CliError::Config("weight_function = \"own\" requires own_weights".to_string())
            })?;
            let weights = top
                .names()
                .iter()
                .map(|name| {
                    own.get(name)
                        .copied()
                        .ok_or_else(|| CliError::MissingWeight(name.clone()))
                })
                .collect::<Result<Vec<f64>, CliError>>()?;
            WeightFunction::Own(weights)
        } else {
            WeightFunction::from_name(&self.weight_function)?
        };

        Ok(SwParams {
            weight_function,
            top_space: self.top_space,
        })
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
