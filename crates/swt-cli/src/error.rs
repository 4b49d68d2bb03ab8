use thiserror::Error;

use swt_core::SwError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Model fitting or scoring failed.
    #[error(transparent)]
    Model(#[from] SwError),

    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An edge or label file line could not be parsed.
    #[error("{source_name}:{line}: {reason}")]
    Parse {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// A bottom node appears in the edge file but has no label.
    #[error("bottom node '{0}' has edges but no label")]
    MissingLabel(String),

    /// A top node has no entry in the configured own weights.
    #[error("own_weights has no entry for top node '{0}'")]
    MissingWeight(String),

    /// The model file is inconsistent with itself.
    #[error("invalid model file: {0}")]
    InvalidModel(String),

    /// Configuration error (TOML parse failure or bad value).
    #[error("Config error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CliError {
    pub fn io(path: &str, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.to_string(),
            source,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}
