// crates/swt-core/src/adjacency.rs
//
// Sparse bipartite adjacency matrices: construction, 0/1 validation, and the
// two sparse products the SW transformation needs.
//
// Rows are bottom nodes, columns are top nodes. Matrices may be stored in
// either CSR or CSC order; every helper here walks the stored entries through
// `outer_iterator()` and maps them back to (row, col).

use std::collections::BTreeSet;

use sprs::{CsMat, TriMat};

use crate::error::SwError;

/// Floor added to degrees and normalizers to avoid division by zero for
/// isolated top nodes and edgeless bottom nodes.
pub const DEGREE_EPSILON: f64 = 1e-20;

/// Visit every stored entry as `(row, col, value)`, regardless of storage order.
fn for_each_entry<F>(x: &CsMat<f64>, mut f: F)
where
    F: FnMut(usize, usize, f64),
{
    let csr = x.is_csr();
    for (outer, lane) in x.outer_iterator().enumerate() {
        for (inner, &value) in lane.iter() {
            if csr {
                f(outer, inner, value);
            } else {
                f(inner, outer, value);
            }
        }
    }
}

/// Check that every stored entry of `x` is exactly 0.0 or 1.0.
///
/// Explicitly stored zeros are accepted. NaN and infinities are rejected
/// like any other non-binary value. The first offending entry in storage
/// order is reported.
pub fn validate_binary(x: &CsMat<f64>) -> Result<(), SwError> {
    let mut offending: Option<(usize, usize, f64)> = None;
    for_each_entry(x, |row, col, value| {
        if offending.is_none() && value != 0.0 && value != 1.0 {
            offending = Some((row, col, value));
        }
    });
    match offending {
        Some((row, col, value)) => Err(SwError::NonBinaryAdjacency { row, col, value }),
        None => Ok(()),
    }
}

/// Degree of every top node: `deg[k] = sum_i X[i,k]` (no epsilon added).
pub fn column_sums(x: &CsMat<f64>) -> Vec<f64> {
    let mut sums = vec![0.0_f64; x.cols()];
    for_each_entry(x, |_, col, value| sums[col] += value);
    sums
}

/// Number of edges incident to every bottom node.
pub fn row_sums(x: &CsMat<f64>) -> Vec<f64> {
    let mut sums = vec![0.0_f64; x.rows()];
    for_each_entry(x, |row, _, value| sums[row] += value);
    sums
}

/// `X^T y`: for every top node, the sum of `y` over its connected bottom nodes.
///
/// Bottom nodes beyond `y.len()` contribute nothing; callers are expected to
/// have checked that `y` has one entry per row.
pub fn transpose_dot(x: &CsMat<f64>, y: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0_f64; x.cols()];
    for_each_entry(x, |row, col, value| {
        if let Some(&label) = y.get(row) {
            out[col] += value * label;
        }
    });
    out
}

/// `X v`: for every bottom node, the sum of `v` over its connected top nodes.
///
/// Columns beyond `v.len()` contribute nothing.
pub fn row_dot(x: &CsMat<f64>, v: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0_f64; x.rows()];
    for_each_entry(x, |row, col, value| {
        if let Some(&weight) = v.get(col) {
            out[row] += value * weight;
        }
    });
    out
}

/// Build a CSR adjacency matrix from `(bottom, top)` edge pairs.
///
/// Duplicate edges collapse to a single 1 entry so the result is always
/// binary. Edges outside the declared shape are rejected.
pub fn from_edges<I>(n_bottom: usize, n_top: usize, edges: I) -> Result<CsMat<f64>, SwError>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut unique = BTreeSet::new();
    for (row, col) in edges {
        if row >= n_bottom || col >= n_top {
            return Err(SwError::EdgeOutOfRange {
                row,
                col,
                n_bottom,
                n_top,
            });
        }
        unique.insert((row, col));
    }

    let mut tri = TriMat::<f64>::new((n_bottom, n_top));
    for (row, col) in unique {
        tri.add_triplet(row, col, 1.0);
    }
    Ok(tri.to_csr())
}

/// Build a CSR matrix from dense rows, storing every non-zero value as-is.
///
/// No binary check is applied here; `validate_binary` is the gate. The
/// column count is the length of the longest row.
pub fn from_dense(rows: &[Vec<f64>]) -> CsMat<f64> {
    let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut tri = TriMat::<f64>::new((rows.len(), n_cols));
    for (i, row) in rows.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if value != 0.0 {
                tri.add_triplet(i, j, value);
            }
        }
    }
    tri.to_csr()
}
