// crates/swt-cli/src/model_file.rs
//
// JSON persistence for fitted models.
//
// A model file carries the fitted top-node vectors together with the
// top-node names they are indexed by, so predict-time edge lists can be
// mapped back into the fit-time top-node space.

use std::fs;

use serde::{Deserialize, Serialize};
use swt_model::{FittedState, SwParams, SwTransformation, TopSpacePolicy, WeightFunction};
use swt_core::Configurable;
use tracing::warn;

use crate::error::CliError;
use crate::graph::NodeIndex;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub format_version: u32,
    /// Label of the weight function used at fit time.
    pub weight_function: String,
    /// Fixed weights, present only for "own" models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub own_weights: Option<Vec<f64>>,
    pub top_space: TopSpacePolicy,
    /// Top-node names in column order.
    pub top_nodes: Vec<String>,
    pub state: FittedState,
}

impl ModelFile {
    /// Capture a fitted model and its top-node vocabulary.
    pub fn capture(model: &SwTransformation, top: &NodeIndex) -> Result<Self, CliError> {
        let state = model.state().cloned().ok_or(swt_core::SwError::NotFitted)?;
        let params = model.get_params();
        let own_weights = match &params.weight_function {
            WeightFunction::Own(weights) => Some(weights.clone()),
            _ => None,
        };
        Ok(Self {
            format_version: FORMAT_VERSION,
            weight_function: params.weight_function.label().to_string(),
            own_weights,
            top_space: params.top_space,
            top_nodes: top.names().to_vec(),
            state,
        })
    }

    pub fn save(&self, path: &str) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| CliError::io(path, e))
    }

    pub fn load(path: &str) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let file: ModelFile = serde_json::from_str(&contents)?;
        file.check()?;
        Ok(file)
    }

    fn check(&self) -> Result<(), CliError> {
        if self.format_version != FORMAT_VERSION {
            return Err(CliError::InvalidModel(format!(
                "unsupported format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }
        if self.top_nodes.len() != self.state.n_top() {
            return Err(CliError::InvalidModel(format!(
                "{} top-node names for {} fitted top nodes",
                self.top_nodes.len(),
                self.state.n_top()
            )));
        }
        Ok(())
    }

    /// Rebuild the fitted estimator and its top-node index.
    ///
    /// Models fitted with a custom weight function restore with the default
    /// weight function; only refitting depends on it.
    pub fn into_model(self) -> (SwTransformation, NodeIndex) {
        let weight_function = match self.own_weights {
            Some(weights) => WeightFunction::Own(weights),
            None => WeightFunction::from_name(&self.weight_function).unwrap_or_else(|_| {
                let fallback = WeightFunction::default();
                warn!(
                    stored = %self.weight_function,
                    fallback = %fallback,
                    "Stored weight function is not built in; refitting will use the fallback"
                );
                fallback
            }),
        };
        let params = SwParams {
            weight_function,
            top_space: self.top_space,
        };
        (
            SwTransformation::from_fitted(params, self.state),
            NodeIndex::from_names(self.top_nodes),
        )
    }
}
