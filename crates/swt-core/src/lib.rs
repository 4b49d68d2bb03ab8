// crates/swt-core/src/lib.rs
//
// swt-core: Core types, error taxonomy, and sparse adjacency primitives for
// the SW transformation.
//
// This is the leaf crate of the workspace. It owns the bipartite adjacency
// conventions (rows = bottom nodes, columns = top nodes, entries in {0,1}),
// the sparse products the scorer is built from, and the estimator traits.

pub mod adjacency;
pub mod error;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use swt_core::SwError;`

pub use adjacency::DEGREE_EPSILON;
pub use error::{ErrorKind, SwError};
pub use traits::{Configurable, ProbabilisticClassifier};

// The sparse matrix type every API in the workspace accepts.
pub use sprs::CsMat;
