use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Serialization formats accepted for a layout override file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Json,
    Yaml,
    Toml,
}

impl fmt::Display for LayoutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutFormat::Json => "JSON",
            LayoutFormat::Yaml => "YAML",
            LayoutFormat::Toml => "TOML",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO
    //-------------------------------------------------------------------------
    #[error("failed to read layout file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    //-------------------------------------------------------------------------
    // Layout
    //-------------------------------------------------------------------------
    #[error("invalid {format} layout file {path}: expected a mapping of field name to column index: {source}")]
    Parse {
        path: PathBuf,
        format: LayoutFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("layout defines no fields")]
    EmptyLayout,

    #[error("fields '{first}' and '{second}' both map to column {index}")]
    DuplicateIndex {
        index: usize,
        first: String,
        second: String,
    },

    //-------------------------------------------------------------------------
    // Lookup table
    //-------------------------------------------------------------------------
    #[error("lookup file has no header row")]
    EmptyLookup,

    #[error("lookup header '{header}' has no 'tag' column")]
    MissingTagColumn { header: String },

    #[error("lookup header '{header}' has more than one 'tag' column")]
    DuplicateTagColumn { header: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(
        path: impl Into<PathBuf>,
        format: LayoutFormat,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            format,
            source: Box::new(source),
        }
    }
}
