use crate::tagging::{ClassificationError, KeyTuple};
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which input a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Layout,
    Lookup,
    Log,
    Report,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Layout => "layout",
            Source::Lookup => "lookup",
            Source::Log => "log",
            Source::Report => "report",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedRow { expected: usize, actual: usize },
    DuplicateKey { previous: String, tag: String },
    UnknownField { field: String },
    ColumnOutOfRange { field: String, index: usize, fields: usize },
    UnknownProtocol { code: String },
    RecordFormat { column: String, index: usize, tokens: usize },
    IoFailure { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub source: Source,
    /// 1-based line number within the source file, when there is one.
    pub line: Option<usize>,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub message: String,
    /// The offending row, verbatim (trimmed).
    pub content: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    issues: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Appends another report, keeping its order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        let line = diagnostic.line.unwrap_or_default();
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                source = %diagnostic.source,
                line,
                content = diagnostic.content.as_deref().unwrap_or_default(),
                "{}",
                diagnostic.message
            ),
            Severity::Error => tracing::error!(
                source = %diagnostic.source,
                line,
                content = diagnostic.content.as_deref().unwrap_or_default(),
                "{}",
                diagnostic.message
            ),
        }
        self.issues.push(diagnostic);
    }

    fn warning(
        &mut self,
        source: Source,
        line: Option<usize>,
        kind: DiagnosticKind,
        message: String,
        content: Option<&str>,
    ) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            source,
            line,
            kind,
            message,
            content: content.map(|c| c.trim().to_string()),
        });
    }

    fn error(
        &mut self,
        source: Source,
        line: Option<usize>,
        kind: DiagnosticKind,
        message: String,
        content: Option<&str>,
    ) {
        self.push(Diagnostic {
            severity: Severity::Error,
            source,
            line,
            kind,
            message,
            content: content.map(|c| c.trim().to_string()),
        });
    }
}

/// Row level findings
impl Diagnostics {
    pub fn malformed_row(
        &mut self,
        source: Source,
        line: usize,
        content: &str,
        expected: usize,
        actual: usize,
    ) {
        self.warning(
            source,
            Some(line),
            DiagnosticKind::MalformedRow { expected, actual },
            format!("row has {actual} tokens, expected {expected}"),
            Some(content),
        );
    }

    pub fn duplicate_key(&mut self, line: usize, key: &KeyTuple, previous: &str, tag: &str) {
        self.warning(
            Source::Lookup,
            Some(line),
            DiagnosticKind::DuplicateKey {
                previous: previous.to_string(),
                tag: tag.to_string(),
            },
            format!("key '{key}' remapped from '{previous}' to '{tag}'"),
            None,
        );
    }

    pub fn unknown_protocol(&mut self, line: usize, code: &str) {
        self.warning(
            Source::Log,
            Some(line),
            DiagnosticKind::UnknownProtocol {
                code: code.to_string(),
            },
            format!("unknown protocol number '{code}' kept as-is"),
            None,
        );
    }

    /// A log record that could not be classified and was left out of the counts.
    pub fn rejected_record(&mut self, content: &str, err: &ClassificationError) {
        let (line, kind) = match err {
            ClassificationError::RecordFormat {
                line,
                column,
                index,
                tokens,
            } => (
                *line,
                DiagnosticKind::RecordFormat {
                    column: column.clone(),
                    index: *index,
                    tokens: *tokens,
                },
            ),
            ClassificationError::UnknownProtocol { line, code } => (
                *line,
                DiagnosticKind::UnknownProtocol { code: code.clone() },
            ),
        };

        self.error(
            Source::Log,
            Some(line),
            kind,
            format!("record skipped: {err}"),
            Some(content),
        );
    }
}

/// Layout findings
impl Diagnostics {
    pub fn unknown_field(&mut self, field: &str) {
        self.warning(
            Source::Layout,
            None,
            DiagnosticKind::UnknownField {
                field: field.to_string(),
            },
            format!("lookup field '{field}' is not defined by the layout and is ignored"),
            None,
        );
    }

    pub fn column_out_of_range(&mut self, field: &str, index: usize, fields: usize) {
        self.warning(
            Source::Layout,
            None,
            DiagnosticKind::ColumnOutOfRange {
                field: field.to_string(),
                index,
                fields,
            },
            format!(
                "lookup field '{field}' maps to column {index} but the layout has {fields} fields; ignored"
            ),
            None,
        );
    }
}

/// Report findings
impl Diagnostics {
    pub fn io_failure(&mut self, path: &Path, err: &std::io::Error) {
        self.error(
            Source::Report,
            None,
            DiagnosticKind::IoFailure {
                path: path.display().to_string(),
            },
            format!("failed to write {}: {err}", path.display()),
            None,
        );
    }
}
