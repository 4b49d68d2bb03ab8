// crates/swt-model/src/lib.rs
//
// swt-model: Top-node weighting, the SW transformation scorer, evaluation
// metrics, and hold-out model selection.
//
// The SW transformation classifies bottom nodes of a bipartite graph by
// projecting training labels onto the top nodes they connect to (weighted by
// a top-node importance function) and normalizing the projection back into a
// positive-class probability. It is a single pass over the adjacency matrix,
// with no iteration and no random state.

pub mod metrics;
pub mod params;
pub mod selection;
pub mod transformation;
pub mod weights;

pub use metrics::{log_loss, roc_auc};
pub use params::{SwParams, TopSpacePolicy};
pub use selection::{grid_search, CandidateScore, GridSearchResult, ParamGrid};
pub use transformation::{FittedState, SwTransformation, DEFAULT_THRESHOLD};
pub use weights::{BuiltinWeight, CustomWeight, WeightFunction};
