use crate::conf::{FieldLayout, KeyColumn};
use crate::diagnostics::{Diagnostics, Source};
use crate::protocol::{self, UnknownProtocolPolicy};
use crate::tagging::counts::{KeyCounts, TagCounts, UNTAGGED};
use crate::tagging::error::ClassificationError;
use crate::tagging::header::LookupHeader;
use crate::tagging::index::{KeyTuple, TagIndex};
use crate::tokenize::{Delimiter, split_line};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Abort on the first record that cannot be classified instead of
    /// skipping it.
    pub strict: bool,
    pub unknown_protocol: UnknownProtocolPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifySummary {
    /// Records counted in both tables.
    pub processed: u64,
    /// Lines that were empty after trimming.
    pub skipped_blank: u64,
    /// Records left out of the counts because no key could be derived.
    pub rejected: u64,
}

impl ClassifySummary {
    pub fn merge(&mut self, other: ClassifySummary) {
        self.processed += other.processed;
        self.skipped_blank += other.skipped_blank;
        self.rejected += other.rejected;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Tagged,
    Untagged,
}

/// Derives a key per log record and tallies it.
///
/// Key columns are resolved once against the layout, in lookup header
/// order, so the keys built here compare equal to the ones built from the
/// lookup rows.
pub struct Classifier<'a> {
    layout: &'a FieldLayout,
    index: &'a TagIndex,
    columns: Vec<KeyColumn>,
    options: ClassifyOptions,
    reported_protocols: HashSet<String, ahash::RandomState>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        layout: &'a FieldLayout,
        header: &LookupHeader,
        index: &'a TagIndex,
        options: ClassifyOptions,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let resolution = layout.resolve_columns(header.key_fields());

        for field in &resolution.unknown {
            diagnostics.unknown_field(field);
        }
        for (field, column) in &resolution.out_of_range {
            diagnostics.column_out_of_range(field, *column, layout.len());
        }

        tracing::debug!(
            columns = ?resolution.columns.iter().map(|c| c.index).collect::<Vec<_>>(),
            "resolved key columns"
        );

        Self {
            layout,
            index,
            columns: resolution.columns,
            options,
            reported_protocols: HashSet::default(),
        }
    }

    pub fn columns(&self) -> &[KeyColumn] {
        &self.columns
    }

    /// Builds the key of one tokenized record.
    pub fn derive_key(
        &mut self,
        line_no: usize,
        tokens: &[&str],
        diagnostics: &mut Diagnostics,
    ) -> Result<KeyTuple, ClassificationError> {
        let mut values = Vec::with_capacity(self.columns.len());

        for column in &self.columns {
            let Some(token) = tokens.get(column.index) else {
                return Err(ClassificationError::RecordFormat {
                    line: line_no,
                    column: column.name.clone(),
                    index: column.index,
                    tokens: tokens.len(),
                });
            };

            if !column.is_protocol {
                values.push(token.to_string());
                continue;
            }

            match protocol::normalize(token) {
                Some(name) => values.push(name.to_string()),
                None => match self.options.unknown_protocol {
                    UnknownProtocolPolicy::Reject => {
                        return Err(ClassificationError::UnknownProtocol {
                            line: line_no,
                            code: token.to_string(),
                        });
                    }
                    UnknownProtocolPolicy::PassThrough => {
                        // once per distinct code
                        if self.reported_protocols.insert(token.to_string()) {
                            diagnostics.unknown_protocol(line_no, token);
                        }
                        values.push(token.to_string());
                    }
                },
            }
        }

        Ok(KeyTuple::new(values))
    }

    /// Classifies a single raw line and updates both tables.
    pub fn classify_line(
        &mut self,
        line_no: usize,
        line: &str,
        tag_counts: &mut TagCounts,
        key_counts: &mut KeyCounts,
        diagnostics: &mut Diagnostics,
    ) -> Result<LineOutcome, ClassificationError> {
        let tokens = split_line(line, Delimiter::Whitespace);
        if tokens.is_empty() {
            return Ok(LineOutcome::Blank);
        }

        if tokens.len() != self.layout.len() {
            // reported, but still classified with whatever tokens exist
            diagnostics.malformed_row(Source::Log, line_no, line, self.layout.len(), tokens.len());
        }

        let key = self.derive_key(line_no, &tokens, diagnostics)?;

        let outcome = match self.index.get(&key) {
            Some(tag) => {
                tag_counts.increment(tag);
                LineOutcome::Tagged
            }
            None => {
                tag_counts.increment(UNTAGGED);
                LineOutcome::Untagged
            }
        };
        key_counts.increment(&key);

        Ok(outcome)
    }

    /// Classifies every line, numbering them from 1.
    ///
    /// # Errors
    ///
    /// In strict mode the first record that cannot be classified aborts the
    /// run. Otherwise such records are reported and skipped.
    pub fn classify<'l>(
        &mut self,
        lines: impl IntoIterator<Item = &'l str>,
        tag_counts: &mut TagCounts,
        key_counts: &mut KeyCounts,
        diagnostics: &mut Diagnostics,
    ) -> Result<ClassifySummary, ClassificationError> {
        self.classify_numbered(
            lines.into_iter().enumerate().map(|(i, line)| (i + 1, line)),
            tag_counts,
            key_counts,
            diagnostics,
        )
    }

    /// Like [`Classifier::classify`] for lines that carry their own numbers,
    /// e.g. one partition of a larger file.
    pub fn classify_numbered<'l>(
        &mut self,
        lines: impl IntoIterator<Item = (usize, &'l str)>,
        tag_counts: &mut TagCounts,
        key_counts: &mut KeyCounts,
        diagnostics: &mut Diagnostics,
    ) -> Result<ClassifySummary, ClassificationError> {
        let mut summary = ClassifySummary::default();

        for (line_no, line) in lines {
            match self.classify_line(line_no, line, tag_counts, key_counts, diagnostics) {
                Ok(LineOutcome::Blank) => summary.skipped_blank += 1,
                Ok(_) => summary.processed += 1,
                Err(err) if self.options.strict => return Err(err),
                Err(err) => {
                    diagnostics.rejected_record(line, &err);
                    summary.rejected += 1;
                }
            }
        }

        tracing::debug!(
            processed = summary.processed,
            skipped_blank = summary.skipped_blank,
            rejected = summary.rejected,
            "classified log records"
        );

        Ok(summary)
    }
}
