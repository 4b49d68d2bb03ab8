// crates/swt-cli/src/graph.rs
//
// Edge-list and label-file loading.
//
// Edge files hold one `bottom,top` pair per line and label files one
// `bottom,label` pair per line. Fields may be separated by a comma, a tab, or
// whitespace. Blank lines and lines starting with `#` are skipped. Node names
// are mapped to dense row/column indices in first-seen order.

use std::collections::HashMap;
use std::fs;

use swt_core::adjacency::from_edges;
use swt_core::CsMat;
use tracing::{debug, warn};

use crate::error::CliError;

/// Bidirectional mapping between node names and dense indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NodeIndex {
    /// Build an index from names already in index order.
    pub fn from_names(names: Vec<String>) -> Self {
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, positions }
    }

    /// Index of `name`, inserting it at the end if unseen.
    pub fn insert(&mut self, name: &str) -> usize {
        if let Some(&i) = self.positions.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.positions.insert(name.to_string(), i);
        i
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An adjacency matrix together with the names behind its rows and columns.
#[derive(Debug, Clone)]
pub struct BipartiteData {
    pub bottom: NodeIndex,
    pub top: NodeIndex,
    pub matrix: CsMat<f64>,
}

/// Split a data line into exactly two fields.
fn split_pair<'a>(line: &'a str, source: &str, number: usize) -> Result<(&'a str, &'a str), CliError> {
    let fields: Vec<&str> = if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };
    match fields.as_slice() {
        [a, b] if !a.is_empty() && !b.is_empty() => Ok((*a, *b)),
        _ => Err(CliError::Parse {
            source_name: source.to_string(),
            line: number,
            reason: format!("expected two fields, got '{}'", line),
        }),
    }
}

/// Iterate non-blank, non-comment lines with 1-based line numbers.
fn data_lines<'a>(contents: &'a str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse `bottom,top` pairs.
pub fn parse_edges(contents: &str, source: &str) -> Result<Vec<(String, String)>, CliError> {
    data_lines(contents)
        .map(|(number, line)| {
            split_pair(line, source, number).map(|(b, t)| (b.to_string(), t.to_string()))
        })
        .collect()
}

/// Parse `bottom,label` pairs. Labels must be 0 or 1.
pub fn parse_labels(contents: &str, source: &str) -> Result<Vec<(String, f64)>, CliError> {
    data_lines(contents)
        .map(|(number, line)| {
            let (node, raw) = split_pair(line, source, number)?;
            let label = match raw {
                "0" | "0.0" => 0.0,
                "1" | "1.0" => 1.0,
                other => {
                    return Err(CliError::Parse {
                        source_name: source.to_string(),
                        line: number,
                        reason: format!("label must be 0 or 1, got '{}'", other),
                    })
                }
            };
            Ok((node.to_string(), label))
        })
        .collect()
}

fn read(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

pub fn read_edges(path: &str) -> Result<Vec<(String, String)>, CliError> {
    parse_edges(&read(path)?, path)
}

pub fn read_labels(path: &str) -> Result<Vec<(String, f64)>, CliError> {
    parse_labels(&read(path)?, path)
}

/// Build a labelled data set, discovering the top-node vocabulary.
///
/// Bottom nodes are ordered as in the label file, so labelled nodes without
/// any edge become empty rows. A bottom node with edges but no label is an
/// error. Returns the data and the label vector aligned with its rows.
pub fn build_labelled(
    edges: &[(String, String)],
    labels: &[(String, f64)],
) -> Result<(BipartiteData, Vec<f64>), CliError> {
    let mut top = NodeIndex::default();
    for (_, t) in edges {
        top.insert(t);
    }
    build_labelled_in(edges, labels, &top)
}

/// Build a labelled data set over an existing top-node vocabulary.
///
/// Edges to top nodes outside `top` are dropped with a warning.
pub fn build_labelled_in(
    edges: &[(String, String)],
    labels: &[(String, f64)],
    top: &NodeIndex,
) -> Result<(BipartiteData, Vec<f64>), CliError> {
    let mut bottom = NodeIndex::default();
    let mut y = Vec::with_capacity(labels.len());
    for (node, label) in labels {
        let before = bottom.len();
        let i = bottom.insert(node);
        if i == before {
            y.push(*label);
        } else {
            warn!(node = %node, "Duplicate label; keeping the first");
        }
    }
    if let Some((b, _)) = edges.iter().find(|(b, _)| bottom.get(b).is_none()) {
        return Err(CliError::MissingLabel(b.clone()));
    }

    let matrix = index_edges(edges, &bottom, top)?;
    Ok((
        BipartiteData {
            bottom,
            top: top.clone(),
            matrix,
        },
        y,
    ))
}

/// Build an unlabelled data set over an existing top-node vocabulary.
///
/// Bottom nodes are ordered by first appearance in `edges`.
pub fn build_unlabelled(edges: &[(String, String)], top: &NodeIndex) -> Result<BipartiteData, CliError> {
    let mut bottom = NodeIndex::default();
    for (b, _) in edges {
        bottom.insert(b);
    }
    let matrix = index_edges(edges, &bottom, top)?;
    Ok(BipartiteData {
        bottom,
        top: top.clone(),
        matrix,
    })
}

fn index_edges(
    edges: &[(String, String)],
    bottom: &NodeIndex,
    top: &NodeIndex,
) -> Result<CsMat<f64>, CliError> {
    let mut dropped = 0usize;
    let mut pairs = Vec::with_capacity(edges.len());
    for (b, t) in edges {
        match (bottom.get(b), top.get(t)) {
            (Some(i), Some(k)) => pairs.push((i, k)),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(dropped, "Dropped edges to top nodes outside the model's top-node space");
    }
    debug!(
        n_bottom = bottom.len(),
        n_top = top.len(),
        edges = pairs.len(),
        "Indexed edge list"
    );
    Ok(from_edges(bottom.len(), top.len(), pairs)?)
}
