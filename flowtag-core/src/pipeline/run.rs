use crate::conf::{FieldLayout, resolve_layout};
use crate::diagnostics::Diagnostics;
use crate::pipeline::error::{InputRole, PipelineError};
use crate::tagging::{
    ClassifySummary, Classifier, ClassifyOptions, KeyCounts, TagCounts, build_tag_tables,
};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Result of one classification run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub tag_counts: TagCounts,
    pub key_counts: KeyCounts,
    pub summary: ClassifySummary,
    /// Number of distinct rules in the lookup index.
    pub rules: usize,
    pub diagnostics: Diagnostics,
}

/// Loads the layout, the lookup file and the log file, then classifies.
pub fn run_files(
    lookup: &Path,
    log: &Path,
    layout: Option<&Path>,
    options: ClassifyOptions,
) -> Result<Outcome, PipelineError> {
    let layout = resolve_layout(layout)?;
    let lookup = read_input(InputRole::Lookup, lookup)?;
    let log = read_input(InputRole::Log, log)?;

    run_text(&lookup, &log, &layout, options)
}

/// Classifies in-memory lookup and log text.
pub fn run_text(
    lookup: &str,
    log: &str,
    layout: &FieldLayout,
    options: ClassifyOptions,
) -> Result<Outcome, PipelineError> {
    let mut diagnostics = Diagnostics::new();

    let mut tables = build_tag_tables(lookup, &mut diagnostics)?;
    let mut classifier = Classifier::new(
        layout,
        &tables.header,
        &tables.index,
        options,
        &mut diagnostics,
    );
    let summary = classifier.classify(
        log.lines(),
        &mut tables.tag_counts,
        &mut tables.key_counts,
        &mut diagnostics,
    )?;

    tracing::info!(
        rules = tables.index.len(),
        processed = summary.processed,
        rejected = summary.rejected,
        warnings = diagnostics.warnings().count(),
        "classification finished"
    );

    Ok(Outcome {
        rules: tables.index.len(),
        tag_counts: tables.tag_counts,
        key_counts: tables.key_counts,
        summary,
        diagnostics,
    })
}

fn read_input(role: InputRole, path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => PipelineError::MissingFile {
            role,
            path: path.to_path_buf(),
        },
        _ => PipelineError::ReadFile {
            role,
            path: path.to_path_buf(),
            source,
        },
    })
}
