use crate::conf::ConfigError;
use crate::tagging::ClassificationError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    Lookup,
    Log,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Lookup => f.write_str("lookup"),
            InputRole::Log => f.write_str("log"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("the {role} file {path} does not exist")]
    MissingFile { role: InputRole, path: PathBuf },

    #[error("failed to read {role} file {path}: {source}")]
    ReadFile {
        role: InputRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("classification aborted: {0}")]
    Classification(#[from] ClassificationError),
}
