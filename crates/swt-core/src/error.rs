use thiserror::Error;

/// Coarse classification of an [`SwError`].
///
/// Model-selection tooling uses this to decide whether a failing candidate
/// should be skipped (configuration/dimension problems) or whether the input
/// data itself is unusable (validation problems).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input data violates a structural invariant (non-binary entries).
    Validation,
    /// The estimator was configured with an unknown name or parameter.
    Configuration,
    /// A vector or matrix has the wrong length or shape.
    Dimension,
    /// The operation is not valid in the estimator's current state.
    State,
    /// Model persistence failed.
    Serialization,
}

/// Errors raised by the SW transformation crates.
#[derive(Debug, Error)]
pub enum SwError {
    /// The adjacency matrix holds a value other than 0 or 1.
    #[error(
        "adjacency matrix must contain only 0/1 entries (found {value} at row {row}, column {col})"
    )]
    NonBinaryAdjacency { row: usize, col: usize, value: f64 },

    /// A label is not a binary indicator.
    #[error("labels must be 0 or 1 (found {value} at index {index})")]
    NonBinaryLabel { index: usize, value: f64 },

    /// A built-in weight function name is not recognised.
    #[error(
        "unknown weight function '{name}': expected one of \"tanh\", \"simple\", \"inverse\" or \"own\""
    )]
    UnknownWeightFunction { name: String },

    /// A parameter name or value passed to `set_param` is not accepted.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The weight vector does not have one entry per top node.
    #[error("top node weights have shape (1, {actual}); expected (1, {expected})")]
    WeightDimension { expected: usize, actual: usize },

    /// An edge references a node outside the declared matrix shape.
    #[error("edge ({row}, {col}) lies outside a {n_bottom}x{n_top} adjacency matrix")]
    EdgeOutOfRange {
        row: usize,
        col: usize,
        n_bottom: usize,
        n_top: usize,
    },

    /// The label vector does not have one entry per bottom node.
    #[error("label vector has {actual} entries; expected {expected} (one per bottom node)")]
    LabelDimension { expected: usize, actual: usize },

    /// A prediction matrix spans a different top-node space than the fit.
    #[error("adjacency matrix has {actual} top-node columns; model was fit on {expected}")]
    TopSpaceMismatch { expected: usize, actual: usize },

    /// A ranking metric needs both classes among the labels.
    #[error("ROC AUC is undefined when only one class is present")]
    SingleClass,

    /// Stored fitted vectors disagree on the top-node count.
    #[error("fitted state is inconsistent: {coef} coefficients but {normalizer} normalizers")]
    InconsistentState { coef: usize, normalizer: usize },

    /// A prediction was requested before `fit`.
    #[error("model is not fitted: call fit before predicting")]
    NotFitted,

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SwError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SwError::NonBinaryAdjacency { .. }
            | SwError::NonBinaryLabel { .. }
            | SwError::SingleClass => ErrorKind::Validation,
            SwError::UnknownWeightFunction { .. } | SwError::InvalidParameter { .. } => {
                ErrorKind::Configuration
            }
            SwError::WeightDimension { .. }
            | SwError::EdgeOutOfRange { .. }
            | SwError::LabelDimension { .. }
            | SwError::TopSpaceMismatch { .. } => ErrorKind::Dimension,
            SwError::NotFitted | SwError::InconsistentState { .. } => ErrorKind::State,
            SwError::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

impl From<serde_json::Error> for SwError {
    fn from(e: serde_json::Error) -> Self {
        SwError::Serialization(e.to_string())
    }
}
