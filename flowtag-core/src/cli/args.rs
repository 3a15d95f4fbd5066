use crate::logging::{DiagnosticsFormat, LogFormat};
use crate::protocol::UnknownProtocolPolicy;
use crate::tagging::ClassifyOptions;
use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: flowtag <lookup_file> <log_file> [layout_file]";

#[derive(Parser, Debug)]
#[command(
    name = "flowtag",
    version,
    about = "Tag flow log records from a lookup table and count the matches"
)]
pub struct Cli {
    /// Lookup table: CSV with a header row containing a `tag` column
    pub lookup_file: PathBuf,

    /// Flow log, one whitespace separated record per line
    pub log_file: PathBuf,

    /// Layout override mapping field names to columns (JSON, YAML or TOML)
    pub layout_file: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Abort on records that cannot be classified instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Treat protocol numbers missing from the protocol table as errors
    #[arg(long)]
    pub reject_unknown_protocols: bool,

    /// Print collected diagnostics after the run
    #[arg(long, value_enum, default_value_t = DiagnosticsChoice::Auto)]
    pub diagnostics: DiagnosticsChoice,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DiagnosticsChoice {
    /// Pretty on a terminal, plain otherwise
    Auto,
    Plain,
    Pretty,
    Json,
}

impl Cli {
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            strict: self.strict,
            unknown_protocol: if self.reject_unknown_protocols {
                UnknownProtocolPolicy::Reject
            } else {
                UnknownProtocolPolicy::PassThrough
            },
        }
    }

    pub fn diagnostics_format(&self) -> DiagnosticsFormat {
        match self.diagnostics {
            DiagnosticsChoice::Auto => crate::logging::default_diagnostics_format(),
            DiagnosticsChoice::Plain => DiagnosticsFormat::Plain,
            DiagnosticsChoice::Pretty => DiagnosticsFormat::Pretty,
            DiagnosticsChoice::Json => DiagnosticsFormat::Json,
        }
    }
}
