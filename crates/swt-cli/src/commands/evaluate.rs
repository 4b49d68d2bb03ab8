// crates/swt-cli/src/commands/evaluate.rs
//
// `swt evaluate` — compare weight functions on a labelled hold-out split.

use clap::Args;
use swt_core::ProbabilisticClassifier;
use swt_model::{grid_search, log_loss, ParamGrid, SwTransformation, WeightFunction};

use crate::config::SwtConfig;
use crate::error::CliError;
use crate::graph::{build_labelled, build_labelled_in, read_edges, read_labels};
use crate::output::{render, CandidateRow, OutputFormat};

/// Evaluate command.
#[derive(Debug, Args)]
pub struct EvaluateCmd {
    /// Training edge list.
    #[arg(long)]
    pub train_edges: String,

    /// Training labels.
    #[arg(long)]
    pub train_labels: String,

    /// Hold-out edge list, mapped into the training top-node space.
    #[arg(long)]
    pub test_edges: String,

    /// Hold-out labels.
    #[arg(long)]
    pub test_labels: String,

    /// Only evaluate the configured weight function instead of all built-ins.
    #[arg(long)]
    pub configured_only: bool,
}

/// Run the evaluate command.
pub fn run(cmd: &EvaluateCmd, config: &SwtConfig, format: OutputFormat) -> Result<(), CliError> {
    let rows = rank(cmd, config)?;
    println!("{}", render(format, &rows));
    Ok(())
}

/// Fit every candidate on the training split and rank by hold-out AUC.
fn rank(cmd: &EvaluateCmd, config: &SwtConfig) -> Result<Vec<CandidateRow>, CliError> {
    let (train, y_train) = build_labelled(
        &read_edges(&cmd.train_edges)?,
        &read_labels(&cmd.train_labels)?,
    )?;
    let (test, y_test) = build_labelled_in(
        &read_edges(&cmd.test_edges)?,
        &read_labels(&cmd.test_labels)?,
        &train.top,
    )?;

    let params = config.params(&train.top)?;
    let candidates = if cmd.configured_only {
        vec![params.weight_function.clone()]
    } else {
        let mut builtins: Vec<WeightFunction> = ParamGrid::builtins()
            .combinations()
            .into_iter()
            .map(|p| p.weight_function)
            .collect();
        if matches!(params.weight_function, WeightFunction::Own(_)) {
            builtins.push(params.weight_function.clone());
        }
        builtins
    };
    let grid = ParamGrid::new()
        .weight_functions(candidates)
        .top_space(vec![params.top_space]);

    let base = SwTransformation::with_params(params);
    let result = grid_search(
        &base,
        &grid,
        (&train.matrix, y_train.as_slice()),
        (&test.matrix, y_test.as_slice()),
    )?;

    let rows: Vec<CandidateRow> = result
        .candidates
        .iter()
        .map(|c| CandidateRow {
            weight_function: c.params.weight_function.label().to_string(),
            top_space: c.params.top_space.name().to_string(),
            auc: c.auc,
        })
        .collect();

    if let Some(best) = result.best() {
        let mut model = SwTransformation::with_params(best.params.clone());
        model.fit(&train.matrix, &y_train)?;
        let p = model.predict_positive(&test.matrix)?;
        tracing::info!(
            "Best: {} (AUC {:.4}, log loss {:.4})",
            best.params,
            best.auc,
            log_loss(&y_test, &p)?
        );
    }
    if result.skipped > 0 {
        tracing::warn!("{} candidate(s) skipped", result.skipped);
    }

    Ok(rows)
}
