// crates/swt-model/src/weights.rs
//
// Top-node weighting functions for the SW transformation.
//
// A weight function maps the fit-time adjacency matrix to one weight per top
// node. Built-in strategies discount high-degree (hub) top nodes by different
// amounts; callers may also supply a fixed vector or their own closure.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use swt_core::adjacency::column_sums;
use swt_core::{CsMat, SwError, DEGREE_EPSILON};

/// The closed set of built-in weighting strategies.
///
/// With `deg[k] = sum_i X[i,k] + 1e-20`:
/// - `Tanh`: `tanh(1 / deg[k])`
/// - `Simple`: `1`
/// - `Inverse`: `1 / deg[k]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinWeight {
    #[default]
    Tanh,
    Simple,
    Inverse,
}

impl BuiltinWeight {
    /// Every built-in strategy, in declaration order.
    pub const ALL: [BuiltinWeight; 3] = [
        BuiltinWeight::Tanh,
        BuiltinWeight::Simple,
        BuiltinWeight::Inverse,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinWeight::Tanh => "tanh",
            BuiltinWeight::Simple => "simple",
            BuiltinWeight::Inverse => "inverse",
        }
    }

    /// Compute one weight per column of `x`.
    pub fn compute(&self, x: &CsMat<f64>) -> Vec<f64> {
        match self {
            BuiltinWeight::Simple => vec![1.0; x.cols()],
            BuiltinWeight::Tanh => column_sums(x)
                .into_iter()
                .map(|d| (1.0 / (d + DEGREE_EPSILON)).tanh())
                .collect(),
            BuiltinWeight::Inverse => column_sums(x)
                .into_iter()
                .map(|d| 1.0 / (d + DEGREE_EPSILON))
                .collect(),
        }
    }
}

impl fmt::Display for BuiltinWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinWeight {
    type Err = SwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tanh" => Ok(BuiltinWeight::Tanh),
            "simple" => Ok(BuiltinWeight::Simple),
            "inverse" => Ok(BuiltinWeight::Inverse),
            _ => Err(SwError::UnknownWeightFunction {
                name: s.to_string(),
            }),
        }
    }
}

/// Signature of a caller-supplied weight function.
pub type WeightFn = dyn Fn(&CsMat<f64>) -> Vec<f64> + Send + Sync;

/// A caller-supplied weight function with a label for logs and reports.
///
/// Two `CustomWeight`s are equal only if they share the same closure
/// allocation and label.
#[derive(Clone)]
pub struct CustomWeight {
    label: String,
    func: Arc<WeightFn>,
}

impl CustomWeight {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&CsMat<f64>) -> Vec<f64> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn call(&self, x: &CsMat<f64>) -> Vec<f64> {
        (self.func)(x)
    }
}

impl fmt::Debug for CustomWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomWeight")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomWeight {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.func, &other.func)
    }
}

/// How the scorer obtains its top-node weights.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightFunction {
    /// One of the built-in degree-based strategies.
    Builtin(BuiltinWeight),
    /// A fixed weight vector, used as-is regardless of the adjacency matrix.
    Own(Vec<f64>),
    /// A caller-supplied function of the adjacency matrix.
    Custom(CustomWeight),
}

impl Default for WeightFunction {
    fn default() -> Self {
        WeightFunction::Builtin(BuiltinWeight::default())
    }
}

impl From<BuiltinWeight> for WeightFunction {
    fn from(builtin: BuiltinWeight) -> Self {
        WeightFunction::Builtin(builtin)
    }
}

impl WeightFunction {
    /// Resolve a built-in strategy by name.
    ///
    /// `"own"` is recognised but rejected here because it needs a weight
    /// vector; construct `WeightFunction::Own` directly instead.
    pub fn from_name(name: &str) -> Result<Self, SwError> {
        if name.trim().eq_ignore_ascii_case("own") {
            return Err(SwError::InvalidParameter {
                name: "weight_function".to_string(),
                reason: "\"own\" requires an explicit weight vector".to_string(),
            });
        }
        Ok(WeightFunction::Builtin(name.parse()?))
    }

    /// Wrap a closure as a custom weight function.
    pub fn custom<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&CsMat<f64>) -> Vec<f64> + Send + Sync + 'static,
    {
        WeightFunction::Custom(CustomWeight::new(label, func))
    }

    /// Short human-readable name.
    pub fn label(&self) -> &str {
        match self {
            WeightFunction::Builtin(builtin) => builtin.name(),
            WeightFunction::Own(_) => "own",
            WeightFunction::Custom(custom) => custom.label(),
        }
    }

    /// Produce the weight vector for `x`. The length is not checked here.
    pub fn top_node_weights(&self, x: &CsMat<f64>) -> Vec<f64> {
        match self {
            WeightFunction::Builtin(builtin) => builtin.compute(x),
            WeightFunction::Own(weights) => weights.clone(),
            WeightFunction::Custom(custom) => custom.call(x),
        }
    }
}

impl fmt::Display for WeightFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
