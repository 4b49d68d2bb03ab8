// crates/swt-core/src/traits.rs

use sprs::CsMat;

use crate::error::SwError;

/// A binary classifier over bipartite adjacency matrices.
///
/// Implemented by swt-model (`SwTransformation`).
pub trait ProbabilisticClassifier {
    /// Fit the model on an adjacency matrix and one binary label per row.
    fn fit(&mut self, x: &CsMat<f64>, y: &[f64]) -> Result<&mut Self, SwError>;

    /// Two-column probability estimates `[negative, positive]` per row.
    fn predict_proba(&self, x: &CsMat<f64>) -> Result<Vec<[f64; 2]>, SwError>;

    /// Positive-class probability per row.
    fn predict_positive(&self, x: &CsMat<f64>) -> Result<Vec<f64>, SwError> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|[_, positive]| positive)
            .collect())
    }
}

/// Parameter introspection for generic model-selection tooling.
///
/// `set_params` is plain assignment: it never refits and never validates
/// against data.
pub trait Configurable {
    /// The full parameter set of the estimator.
    type Params: Clone;

    /// Snapshot the current parameters.
    fn get_params(&self) -> Self::Params;

    /// Replace the parameters wholesale.
    fn set_params(&mut self, params: Self::Params) -> &mut Self;

    /// Assign a single parameter by name from its textual form.
    fn set_param(&mut self, name: &str, value: &str) -> Result<&mut Self, SwError>;
}
