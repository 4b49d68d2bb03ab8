// crates/swt-cli/src/commands/fit.rs
//
// `swt fit` — train a model from an edge list and bottom-node labels.

use clap::Args;
use swt_core::ProbabilisticClassifier;
use swt_model::SwTransformation;

use crate::config::SwtConfig;
use crate::error::CliError;
use crate::graph::{build_labelled, read_edges, read_labels};
use crate::model_file::ModelFile;

/// Fit command.
#[derive(Debug, Args)]
pub struct FitCmd {
    /// Edge list: one `bottom,top` pair per line.
    #[arg(long)]
    pub edges: String,

    /// Labels: one `bottom,label` pair per line, label 0 or 1.
    #[arg(long)]
    pub labels: String,

    /// Where to write the fitted model (JSON).
    #[arg(long, default_value = "swt-model.json")]
    pub model: String,
}

/// Run the fit command.
pub fn run(cmd: &FitCmd, config: &SwtConfig) -> Result<(), CliError> {
    let edges = read_edges(&cmd.edges)?;
    let labels = read_labels(&cmd.labels)?;
    let (data, y) = build_labelled(&edges, &labels)?;

    let params = config.params(&data.top)?;
    tracing::info!(
        "Fitting on {} bottom nodes, {} top nodes ({})",
        data.bottom.len(),
        data.top.len(),
        params
    );

    let mut model = SwTransformation::with_params(params);
    model.fit(&data.matrix, &y)?;

    ModelFile::capture(&model, &data.top)?.save(&cmd.model)?;
    println!(
        "Model fitted on {} bottom nodes and {} top nodes; saved to {}",
        data.bottom.len(),
        data.top.len(),
        cmd.model
    );

    Ok(())
}
