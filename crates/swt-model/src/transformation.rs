// crates/swt-model/src/transformation.rs
//
// The SW transformation scorer.
//
// Fitting projects bottom-node labels onto top nodes:
//   coef[k]       = w[k] * sum_i X[i,k] * y[i]
//   normalizer[k] = w[k] * (sum_i X[i,k] + eps)
// Prediction projects them back onto (possibly new) bottom nodes:
//   p[i] = sum_k X[i,k] * coef[k] / (sum_k X[i,k] * normalizer[k] + eps)

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use swt_core::adjacency::{column_sums, row_dot, transpose_dot, validate_binary};
use swt_core::{Configurable, CsMat, ProbabilisticClassifier, SwError, DEGREE_EPSILON};

use crate::params::{SwParams, TopSpacePolicy};
use crate::weights::WeightFunction;

/// Decision threshold used by [`SwTransformation::predict`].
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Per-top-node vectors produced by a successful fit.
///
/// Deserialization goes through [`FittedState::from_parts`], so both vectors
/// always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct FittedState {
    /// Weighted positive-label mass per top node (`coef_`).
    coef: Vec<f64>,
    /// Weighted degree per top node (`Z_`).
    normalizer: Vec<f64>,
}

/// Unchecked wire form of [`FittedState`].
#[derive(Deserialize)]
struct StoredState {
    coef: Vec<f64>,
    normalizer: Vec<f64>,
}

impl TryFrom<StoredState> for FittedState {
    type Error = SwError;

    fn try_from(stored: StoredState) -> Result<Self, Self::Error> {
        FittedState::from_parts(stored.coef, stored.normalizer)
    }
}

impl FittedState {
    /// Rebuild a state from stored vectors, e.g. a model file.
    pub fn from_parts(coef: Vec<f64>, normalizer: Vec<f64>) -> Result<Self, SwError> {
        if coef.len() != normalizer.len() {
            return Err(SwError::InconsistentState {
                coef: coef.len(),
                normalizer: normalizer.len(),
            });
        }
        Ok(Self { coef, normalizer })
    }

    /// Size of the top-node space the state was fit on.
    pub fn n_top(&self) -> usize {
        self.coef.len()
    }

    pub fn coef(&self) -> &[f64] {
        &self.coef
    }

    pub fn normalizer(&self) -> &[f64] {
        &self.normalizer
    }
}

/// Supervised bipartite-graph classifier based on the SW transformation.
///
/// Starts unfit; `fit` moves it to the fitted state and every later `fit`
/// replaces the stored vectors wholesale. A failed `fit` leaves the previous
/// state untouched.
#[derive(Debug, Clone, Default)]
pub struct SwTransformation {
    params: SwParams,
    state: Option<FittedState>,
}

impl SwTransformation {
    /// Create an unfit scorer with the given weight function.
    pub fn new(weight_function: impl Into<WeightFunction>) -> Self {
        Self::with_params(SwParams::default().with_weight_function(weight_function))
    }

    /// Create an unfit scorer from a full parameter set.
    pub fn with_params(params: SwParams) -> Self {
        Self {
            params,
            state: None,
        }
    }

    /// Create a fitted scorer from previously stored state.
    pub fn from_fitted(params: SwParams, state: FittedState) -> Self {
        Self {
            params,
            state: Some(state),
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&FittedState> {
        self.state.as_ref()
    }

    /// `coef_`, if fitted.
    pub fn coef(&self) -> Option<&[f64]> {
        self.state.as_ref().map(FittedState::coef)
    }

    /// `Z_`, if fitted.
    pub fn normalizer(&self) -> Option<&[f64]> {
        self.state.as_ref().map(FittedState::normalizer)
    }

    /// Top-node count seen at fit time, if fitted.
    pub fn n_top(&self) -> Option<usize> {
        self.state.as_ref().map(FittedState::n_top)
    }

    /// Hard 0/1 predictions at [`DEFAULT_THRESHOLD`].
    pub fn predict(&self, x: &CsMat<f64>) -> Result<Vec<u8>, SwError> {
        self.predict_with_threshold(x, DEFAULT_THRESHOLD)
    }

    /// Hard 0/1 predictions: 1 where the positive probability is at least
    /// `threshold`.
    pub fn predict_with_threshold(
        &self,
        x: &CsMat<f64>,
        threshold: f64,
    ) -> Result<Vec<u8>, SwError> {
        Ok(self
            .predict_positive(x)?
            .into_iter()
            .map(|p| u8::from(p >= threshold))
            .collect())
    }

    fn check_labels(x: &CsMat<f64>, y: &[f64]) -> Result<(), SwError> {
        if y.len() != x.rows() {
            return Err(SwError::LabelDimension {
                expected: x.rows(),
                actual: y.len(),
            });
        }
        if let Some((index, &value)) = y
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != 0.0 && v != 1.0)
        {
            return Err(SwError::NonBinaryLabel { index, value });
        }
        Ok(())
    }

    fn check_top_space(&self, state: &FittedState, x: &CsMat<f64>) -> Result<(), SwError> {
        if x.cols() == state.n_top() {
            return Ok(());
        }
        match self.params.top_space {
            TopSpacePolicy::Strict => Err(SwError::TopSpaceMismatch {
                expected: state.n_top(),
                actual: x.cols(),
            }),
            TopSpacePolicy::Lenient => {
                warn!(
                    expected = state.n_top(),
                    actual = x.cols(),
                    "Top-node space differs from fit; scoring shared columns only"
                );
                Ok(())
            }
        }
    }
}

impl ProbabilisticClassifier for SwTransformation {
    fn fit(&mut self, x: &CsMat<f64>, y: &[f64]) -> Result<&mut Self, SwError> {
        validate_binary(x)?;
        Self::check_labels(x, y)?;

        let weights = self.params.weight_function.top_node_weights(x);
        if weights.len() != x.cols() {
            return Err(SwError::WeightDimension {
                expected: x.cols(),
                actual: weights.len(),
            });
        }

        let label_mass = transpose_dot(x, y);
        let degrees = column_sums(x);

        let coef: Vec<f64> = weights
            .iter()
            .zip(&label_mass)
            .map(|(w, mass)| w * mass)
            .collect();
        let normalizer: Vec<f64> = weights
            .iter()
            .zip(&degrees)
            .map(|(w, deg)| w * (deg + DEGREE_EPSILON))
            .collect();

        let isolated = degrees.iter().filter(|&&d| d == 0.0).count();
        if isolated > 0 {
            debug!(isolated, "Top nodes without any bottom-node edge at fit time");
        }

        debug!(
            n_bottom = x.rows(),
            n_top = x.cols(),
            edges = x.nnz(),
            positives = y.iter().filter(|&&v| v == 1.0).count(),
            weight_function = %self.params.weight_function,
            "Fitted SW transformation"
        );

        self.state = Some(FittedState { coef, normalizer });
        Ok(self)
    }

    fn predict_proba(&self, x: &CsMat<f64>) -> Result<Vec<[f64; 2]>, SwError> {
        validate_binary(x)?;
        let state = self.state.as_ref().ok_or(SwError::NotFitted)?;
        self.check_top_space(state, x)?;

        let raw = row_dot(x, &state.coef);
        let norm = row_dot(x, &state.normalizer);

        let proba: Vec<[f64; 2]> = raw
            .iter()
            .zip(&norm)
            .map(|(score, z)| {
                let positive = score / (z + DEGREE_EPSILON);
                [1.0 - positive, positive]
            })
            .collect();

        debug!(n_bottom = x.rows(), "Scored bottom nodes");
        Ok(proba)
    }
}

impl Configurable for SwTransformation {
    type Params = SwParams;

    fn get_params(&self) -> SwParams {
        self.params.clone()
    }

    fn set_params(&mut self, params: SwParams) -> &mut Self {
        self.params = params;
        self
    }

    fn set_param(&mut self, name: &str, value: &str) -> Result<&mut Self, SwError> {
        self.params.assign(name, value)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::BuiltinWeight;
    use swt_core::adjacency::from_dense;
    use swt_core::ErrorKind;

    fn scenario() -> (CsMat<f64>, Vec<f64>) {
        let x = from_dense(&[vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]]);
        (x, vec![1.0, 0.0, 1.0])
    }

    #[test]
    fn hand_computed_scenario_with_simple_weights() {
        let (x, y) = scenario();
        let mut model = SwTransformation::new(BuiltinWeight::Simple);
        model.fit(&x, &y).unwrap();

        // deg = [2, 2], label mass = [1, 1]
        let coef = model.coef().unwrap();
        let z = model.normalizer().unwrap();
        assert!((coef[0] - 1.0).abs() < 1e-9 && (coef[1] - 1.0).abs() < 1e-9);
        assert!((z[0] - 2.0).abs() < 1e-9 && (z[1] - 2.0).abs() < 1e-9);

        let proba = model.predict_proba(&x).unwrap();
        let expected = [
            coef[0] / (z[0] + DEGREE_EPSILON),
            (coef[0] + coef[1]) / (z[0] + z[1] + DEGREE_EPSILON),
            coef[1] / (z[1] + DEGREE_EPSILON),
        ];
        for (row, p) in proba.iter().zip(expected) {
            assert!((row[1] - p).abs() < 1e-9);
            assert!((row[1] - 0.5).abs() < 1e-9);
            assert!((row[0] - (1.0 - p)).abs() < 1e-9);
        }
    }

    #[test]
    fn inverse_weights_scenario() {
        // top0 has degree 3 (two positives), top1 has degree 1 (one negative).
        let x = from_dense(&[vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]]);
        let y = vec![1.0, 1.0, 0.0];
        let mut model = SwTransformation::new(BuiltinWeight::Inverse);
        model.fit(&x, &y).unwrap();

        let coef = model.coef().unwrap();
        assert!((coef[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!(coef[1].abs() < 1e-9);

        // Row 2 touches both: (2/3 + 0) / (1 + 1) = 1/3
        let p = model.predict_positive(&x).unwrap();
        assert!((p[2] - 1.0 / 3.0).abs() < 1e-9);
        assert!((p[0] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn all_positive_simple_yields_certainty() {
        let x = from_dense(&[
            vec![1.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 1.0, 1.0],
        ]);
        let mut model = SwTransformation::new(BuiltinWeight::Simple);
        model.fit(&x, &[1.0, 1.0, 1.0]).unwrap();
        for row in model.predict_proba(&x).unwrap() {
            assert!((row[1] - 1.0).abs() < 1e-12);
            assert!(row[0].abs() < 1e-12);
        }
    }

    #[test]
    fn edgeless_bottom_node_scores_zero() {
        let (x, y) = scenario();
        let mut model = SwTransformation::default();
        model.fit(&x, &y).unwrap();
        let new = from_dense(&[vec![0.0, 0.0]]);
        let proba = model.predict_proba(&new).unwrap();
        assert_eq!(proba, vec![[1.0, 0.0]]);
    }

    #[test]
    fn fit_rejects_non_binary_adjacency() {
        let x = from_dense(&[vec![2.0, 0.0], vec![0.0, 1.0]]);
        let mut model = SwTransformation::default();
        let err = model.fit(&x, &[1.0, 0.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!model.is_fitted());
    }

    #[test]
    fn predict_rejects_non_binary_adjacency() {
        let (x, y) = scenario();
        let mut model = SwTransformation::default();
        model.fit(&x, &y).unwrap();
        let bad = from_dense(&[vec![1.0, 2.0]]);
        let err = model.predict_proba(&bad).unwrap_err();
        assert!(matches!(err, SwError::NonBinaryAdjacency { row: 0, col: 1, .. }));
    }

    #[test]
    fn custom_weights_with_wrong_length_fail() {
        let (x, y) = scenario();
        let mut model =
            SwTransformation::new(WeightFunction::custom("short", |_: &CsMat<f64>| vec![1.0]));
        let err = model.fit(&x, &y).unwrap_err();
        assert!(matches!(
            err,
            SwError::WeightDimension {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn own_weights_are_length_checked() {
        let (x, y) = scenario();
        let mut model = SwTransformation::new(WeightFunction::Own(vec![1.0, 1.0, 1.0]));
        assert_eq!(model.fit(&x, &y).unwrap_err().kind(), ErrorKind::Dimension);

        let mut model = SwTransformation::new(WeightFunction::Own(vec![1.0, 3.0]));
        model.fit(&x, &y).unwrap();
        assert_eq!(model.coef().unwrap(), &[1.0, 3.0]);
    }

    #[test]
    fn label_length_and_values_are_checked() {
        let (x, _) = scenario();
        let mut model = SwTransformation::default();
        assert!(matches!(
            model.fit(&x, &[1.0, 0.0]).unwrap_err(),
            SwError::LabelDimension {
                expected: 3,
                actual: 2
            }
        ));
        assert!(matches!(
            model.fit(&x, &[1.0, 0.5, 0.0]).unwrap_err(),
            SwError::NonBinaryLabel { index: 1, .. }
        ));
    }

    #[test]
    fn failed_refit_keeps_previous_state() {
        let (x, y) = scenario();
        let mut model = SwTransformation::new(BuiltinWeight::Simple);
        model.fit(&x, &y).unwrap();
        let before = model.state().cloned();

        let bad = from_dense(&[vec![1.0, 3.0], vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert!(model.fit(&bad, &y).is_err());
        model.set_params(SwParams::default().with_weight_function(WeightFunction::Own(vec![])));
        assert!(model.fit(&x, &y).is_err());

        assert_eq!(model.state().cloned(), before);
    }

    #[test]
    fn predict_before_fit_is_state_error() {
        let (x, _) = scenario();
        let model = SwTransformation::default();
        assert_eq!(
            model.predict_proba(&x).unwrap_err().kind(),
            ErrorKind::State
        );
    }

    #[test]
    fn strict_policy_rejects_top_space_mismatch() {
        let (x, y) = scenario();
        let mut model = SwTransformation::default();
        model.fit(&x, &y).unwrap();
        let wider = from_dense(&[vec![1.0, 0.0, 1.0]]);
        assert!(matches!(
            model.predict_proba(&wider).unwrap_err(),
            SwError::TopSpaceMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn lenient_policy_scores_shared_columns() {
        let (x, y) = scenario();
        let params = SwParams::default()
            .with_weight_function(BuiltinWeight::Simple)
            .with_top_space(TopSpacePolicy::Lenient);
        let mut model = SwTransformation::with_params(params);
        model.fit(&x, &y).unwrap();

        let wider = from_dense(&[vec![1.0, 0.0, 1.0]]);
        let narrower = from_dense(&[vec![1.0]]);
        let same = from_dense(&[vec![1.0, 0.0]]);
        let expected = model.predict_positive(&same).unwrap();
        assert_eq!(model.predict_positive(&wider).unwrap(), expected);
        assert_eq!(model.predict_positive(&narrower).unwrap(), expected);
    }

    #[test]
    fn refit_is_deterministic() {
        let (x, y) = scenario();
        let mut model = SwTransformation::default();
        model.fit(&x, &y).unwrap();
        let first = model.state().cloned();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.state().cloned(), first);
    }

    #[test]
    fn predict_thresholds_positive_probability() {
        let x = from_dense(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        let mut model = SwTransformation::new(BuiltinWeight::Simple);
        model.fit(&x, &[1.0, 0.0]).unwrap();
        assert_eq!(model.predict(&x).unwrap(), vec![1, 0]);
        assert_eq!(model.predict_with_threshold(&x, 1.5).unwrap(), vec![0, 0]);
    }

    #[test]
    fn params_round_trip() {
        let mut model = SwTransformation::default();
        model.set_param("weight_function", "inverse").unwrap();
        assert_eq!(model.get_params().weight_function.label(), "inverse");
        assert!(model.set_param("weight_function", "nope").is_err());
        assert_eq!(model.get_params().weight_function.label(), "inverse");
    }

    #[test]
    fn from_fitted_restores_predictions() {
        let (x, y) = scenario();
        let mut model = SwTransformation::default();
        model.fit(&x, &y).unwrap();

        let json = serde_json::to_string(model.state().unwrap()).unwrap();
        let state: FittedState = serde_json::from_str(&json).unwrap();
        let restored = SwTransformation::from_fitted(model.get_params(), state);
        assert_eq!(
            restored.predict_proba(&x).unwrap(),
            model.predict_proba(&x).unwrap()
        );
    }

    #[test]
    fn from_parts_rejects_mismatched_vectors() {
        assert!(matches!(
            FittedState::from_parts(vec![1.0], vec![1.0, 2.0]),
            Err(SwError::InconsistentState {
                coef: 1,
                normalizer: 2
            })
        ));
        assert_eq!(
            FittedState::from_parts(vec![1.0, 0.0], vec![2.0, 2.0])
                .unwrap()
                .n_top(),
            2
        );
    }

    #[test]
    fn deserialization_rejects_mismatched_vectors() {
        let err = serde_json::from_str::<FittedState>(r#"{"coef":[1.0,1.0],"normalizer":[2.0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("2 coefficients but 1 normalizers"));

        let ok = serde_json::from_str::<FittedState>(r#"{"coef":[1.0,1.0],"normalizer":[2.0,2.0]}"#)
            .unwrap();
        assert_eq!(ok.n_top(), 2);
    }
}
