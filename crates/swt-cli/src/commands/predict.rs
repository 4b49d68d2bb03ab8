// crates/swt-cli/src/commands/predict.rs
//
// `swt predict` — score bottom nodes with a fitted model.

use clap::Args;
use swt_core::ProbabilisticClassifier;

use crate::error::CliError;
use crate::graph::{build_unlabelled, read_edges};
use crate::model_file::ModelFile;
use crate::output::{render, OutputFormat, PredictionRow};

/// Predict command.
#[derive(Debug, Args)]
pub struct PredictCmd {
    /// Edge list of the bottom nodes to score.
    #[arg(long)]
    pub edges: String,

    /// Fitted model file written by `swt fit`.
    #[arg(long, default_value = "swt-model.json")]
    pub model: String,
}

/// Run the predict command.
pub fn run(cmd: &PredictCmd, format: OutputFormat) -> Result<(), CliError> {
    let rows = score(cmd)?;
    println!("{}", render(format, &rows));
    Ok(())
}

/// Score every bottom node in the edge list, in first-seen order.
fn score(cmd: &PredictCmd) -> Result<Vec<PredictionRow>, CliError> {
    let (model, top) = ModelFile::load(&cmd.model)?.into_model();
    let edges = read_edges(&cmd.edges)?;
    let data = build_unlabelled(&edges, &top)?;

    let proba = model.predict_proba(&data.matrix)?;
    Ok(data
        .bottom
        .names()
        .iter()
        .zip(proba)
        .map(|(node, [negative, positive])| PredictionRow {
            node: node.clone(),
            negative,
            positive,
        })
        .collect())
}
