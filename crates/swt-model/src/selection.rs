// crates/swt-model/src/selection.rs
//
// Hold-out grid search over estimator parameters.
//
// Each parameter combination is applied to a clone of a base estimator through
// `Configurable::set_params`, fitted on the training split, and ranked by
// ROC AUC on the validation split.

use tracing::{info, warn};

use swt_core::{Configurable, CsMat, ErrorKind, ProbabilisticClassifier, SwError};

use crate::metrics::roc_auc;
use crate::params::{SwParams, TopSpacePolicy};
use crate::transformation::SwTransformation;
use crate::weights::{BuiltinWeight, WeightFunction};

/// Cartesian product of candidate parameter values.
#[derive(Debug, Clone)]
pub struct ParamGrid {
    weight_functions: Vec<WeightFunction>,
    top_space: Vec<TopSpacePolicy>,
}

impl ParamGrid {
    /// A grid with the default value of every parameter.
    pub fn new() -> Self {
        Self {
            weight_functions: vec![WeightFunction::default()],
            top_space: vec![TopSpacePolicy::default()],
        }
    }

    /// Every built-in weight function under the default top-space policy.
    pub fn builtins() -> Self {
        Self::new().weight_functions(BuiltinWeight::ALL.iter().map(|&b| b.into()).collect())
    }

    pub fn weight_functions(mut self, candidates: Vec<WeightFunction>) -> Self {
        self.weight_functions = candidates;
        self
    }

    pub fn top_space(mut self, candidates: Vec<TopSpacePolicy>) -> Self {
        self.top_space = candidates;
        self
    }

    /// Number of parameter combinations.
    pub fn len(&self) -> usize {
        self.weight_functions.len() * self.top_space.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand the grid, weight function varying slowest.
    pub fn combinations(&self) -> Vec<SwParams> {
        let mut out = Vec::with_capacity(self.len());
        for wf in &self.weight_functions {
            for &ts in &self.top_space {
                out.push(SwParams {
                    weight_function: wf.clone(),
                    top_space: ts,
                });
            }
        }
        out
    }
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation result for one parameter combination.
#[derive(Debug, Clone)]
pub struct CandidateScore {
    pub params: SwParams,
    pub auc: f64,
}

/// All successfully evaluated candidates, best first.
#[derive(Debug, Clone, Default)]
pub struct GridSearchResult {
    pub candidates: Vec<CandidateScore>,
    /// Combinations rejected for their own parameters: an unknown name or a
    /// weight vector of the wrong length.
    pub skipped: usize,
}

impl GridSearchResult {
    pub fn best(&self) -> Option<&CandidateScore> {
        self.candidates.first()
    }
}

/// Evaluate every combination in `grid` on a hold-out split.
///
/// Candidates failing with a configuration error or a weight vector of the
/// wrong length are skipped and counted. Any other error means the data itself
/// is unusable and is returned immediately, including a validation split whose
/// labels or top-node columns do not line up with the training split.
pub fn grid_search(
    base: &SwTransformation,
    grid: &ParamGrid,
    train: (&CsMat<f64>, &[f64]),
    validation: (&CsMat<f64>, &[f64]),
) -> Result<GridSearchResult, SwError> {
    let (x_train, y_train) = train;
    let (x_val, y_val) = validation;
    for (x, y) in [(x_train, y_train), (x_val, y_val)] {
        if y.len() != x.rows() {
            return Err(SwError::LabelDimension {
                expected: x.rows(),
                actual: y.len(),
            });
        }
    }
    let mut result = GridSearchResult::default();

    for params in grid.combinations() {
        let mut candidate = base.clone();
        candidate.set_params(params.clone());

        let scored = candidate
            .fit(x_train, y_train)
            .and_then(|fitted| fitted.predict_positive(x_val))
            .and_then(|scores| roc_auc(y_val, &scores));

        match scored {
            Ok(auc) => {
                info!(params = %params, auc, "Evaluated candidate");
                result.candidates.push(CandidateScore { params, auc });
            }
            Err(e)
                if e.kind() == ErrorKind::Configuration
                    || matches!(e, SwError::WeightDimension { .. }) =>
            {
                warn!(params = %params, error = %e, "Skipping candidate");
                result.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    result
        .candidates
        .sort_by(|a, b| b.auc.total_cmp(&a.auc));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swt_core::adjacency::from_dense;

    #[test]
    fn builtins_grid_has_three_combinations() {
        let grid = ParamGrid::builtins();
        assert_eq!(grid.len(), 3);
        let labels: Vec<String> = grid
            .combinations()
            .iter()
            .map(|p| p.weight_function.label().to_string())
            .collect();
        assert_eq!(labels, vec!["tanh", "simple", "inverse"]);
    }

    #[test]
    fn combinations_are_cartesian() {
        let grid = ParamGrid::builtins()
            .top_space(vec![TopSpacePolicy::Strict, TopSpacePolicy::Lenient]);
        assert_eq!(grid.combinations().len(), 6);
        assert!(!grid.is_empty());
    }

    #[test]
    fn ranks_candidates_and_skips_bad_ones() {
        let x = from_dense(&[
            vec![1.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
        ]);
        let y = vec![1.0, 1.0, 0.0, 0.0];
        let grid = ParamGrid::builtins().weight_functions(vec![
            BuiltinWeight::Simple.into(),
            BuiltinWeight::Inverse.into(),
            WeightFunction::Own(vec![1.0]),
        ]);

        let result = grid_search(
            &SwTransformation::default(),
            &grid,
            (&x, y.as_slice()),
            (&x, y.as_slice()),
        )
        .unwrap();
        assert_eq!(result.skipped, 1);
        assert_eq!(result.candidates.len(), 2);
        let best = result.best().unwrap();
        assert!((best.auc - 1.0).abs() < 1e-12);
        for pair in result.candidates.windows(2) {
            assert!(pair[0].auc >= pair[1].auc);
        }
        assert_eq!(best.params.top_space, TopSpacePolicy::Strict);
    }

    #[test]
    fn invalid_data_aborts_search() {
        let x = from_dense(&[vec![2.0], vec![1.0]]);
        let y = vec![1.0, 0.0];
        let err = grid_search(
            &SwTransformation::default(),
            &ParamGrid::builtins(),
            (&x, y.as_slice()),
            (&x, y.as_slice()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    fn two_column_split() -> (CsMat<f64>, Vec<f64>) {
        let x = from_dense(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        (x, vec![1.0, 0.0])
    }

    #[test]
    fn validation_top_space_mismatch_aborts_search() {
        let (x, y) = two_column_split();
        let wider = from_dense(&[vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 0.0]]);
        let err = grid_search(
            &SwTransformation::default(),
            &ParamGrid::builtins(),
            (&x, y.as_slice()),
            (&wider, y.as_slice()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SwError::TopSpaceMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn validation_label_length_mismatch_aborts_search() {
        let (x, y) = two_column_split();
        let err = grid_search(
            &SwTransformation::default(),
            &ParamGrid::builtins(),
            (&x, y.as_slice()),
            (&x, &y[..1]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SwError::LabelDimension {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn lenient_policy_scores_wider_validation_split() {
        let (x, y) = two_column_split();
        let wider = from_dense(&[vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 0.0]]);
        let grid = ParamGrid::builtins().top_space(vec![TopSpacePolicy::Lenient]);
        let result = grid_search(
            &SwTransformation::default(),
            &grid,
            (&x, y.as_slice()),
            (&wider, y.as_slice()),
        )
        .unwrap();
        assert_eq!(result.candidates.len(), 3);
        assert_eq!(result.skipped, 0);
    }
}
