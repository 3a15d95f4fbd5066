use thiserror::Error;

/// A log record that cannot be turned into a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("line {line}: column '{column}' (index {index}) is missing, record has {tokens} tokens")]
    RecordFormat {
        line: usize,
        column: String,
        index: usize,
        tokens: usize,
    },

    #[error("line {line}: unknown protocol number '{code}'")]
    UnknownProtocol { line: usize, code: String },
}

impl ClassificationError {
    pub fn line(&self) -> usize {
        match self {
            ClassificationError::RecordFormat { line, .. } => *line,
            ClassificationError::UnknownProtocol { line, .. } => *line,
        }
    }
}
