// crates/swt-model/src/params.rs
//
// Estimator parameters for the SW transformation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swt_core::SwError;

use crate::weights::WeightFunction;

/// How `predict_proba` treats a matrix whose column count differs from the
/// top-node space seen at fit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopSpacePolicy {
    /// Reject the matrix with a top-space mismatch error.
    #[default]
    Strict,
    /// Score against the shared prefix of columns: extra columns are ignored
    /// and missing trailing columns contribute nothing.
    Lenient,
}

impl TopSpacePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            TopSpacePolicy::Strict => "strict",
            TopSpacePolicy::Lenient => "lenient",
        }
    }
}

impl fmt::Display for TopSpacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TopSpacePolicy {
    type Err = SwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(TopSpacePolicy::Strict),
            "lenient" => Ok(TopSpacePolicy::Lenient),
            other => Err(SwError::InvalidParameter {
                name: "top_space".to_string(),
                reason: format!("expected \"strict\" or \"lenient\", got \"{}\"", other),
            }),
        }
    }
}

/// The full parameter set of an `SwTransformation`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwParams {
    /// Top-node weighting strategy. Default: tanh.
    pub weight_function: WeightFunction,
    /// Top-space handling at predict time. Default: strict.
    pub top_space: TopSpacePolicy,
}

impl SwParams {
    /// Names accepted by `Configurable::set_param`.
    pub const NAMES: [&'static str; 2] = ["weight_function", "top_space"];

    pub fn with_weight_function(mut self, weight_function: impl Into<WeightFunction>) -> Self {
        self.weight_function = weight_function.into();
        self
    }

    pub fn with_top_space(mut self, top_space: TopSpacePolicy) -> Self {
        self.top_space = top_space;
        self
    }

    /// Assign one parameter from its textual form.
    pub fn assign(&mut self, name: &str, value: &str) -> Result<(), SwError> {
        match name {
            "weight_function" => self.weight_function = WeightFunction::from_name(value)?,
            "top_space" => self.top_space = value.parse()?,
            _ => {
                return Err(SwError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("valid parameters are {:?}", Self::NAMES),
                })
            }
        }
        Ok(())
    }
}

impl fmt::Display for SwParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "weight_function={}, top_space={}",
            self.weight_function, self.top_space
        )
    }
}
