use crate::conf::ConfigError;
use crate::diagnostics::{Diagnostics, Source};
use crate::tagging::counts::{KeyCounts, TagCounts};
use crate::tagging::header::LookupHeader;
use crate::tagging::index::TagIndex;
use crate::tokenize::{Delimiter, split_line};

/// Everything derived from the lookup file.
#[derive(Debug, Clone)]
pub struct TagTables {
    pub header: LookupHeader,
    pub index: TagIndex,
    /// Seeded with `Untagged` and every lookup tag at zero.
    pub tag_counts: TagCounts,
    /// Seeded with every lookup key at zero.
    pub key_counts: KeyCounts,
}

/// Parses a whole lookup file: the first non-blank line is the header,
/// every later non-blank line is a rule.
///
/// # Errors
///
/// Only a missing or unusable header is fatal. Rows with the wrong number
/// of tokens are skipped and reported through `diagnostics`.
pub fn build_tag_tables(
    lookup: &str,
    diagnostics: &mut Diagnostics,
) -> Result<TagTables, ConfigError> {
    let mut lines = lookup
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .skip_while(|(_, line)| line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(ConfigError::EmptyLookup)?;
    let header = LookupHeader::parse(header_line)?;

    Ok(build_tag_index(header, lines, diagnostics))
}

/// Builds the index and seeded counters from numbered data rows.
pub fn build_tag_index<'a>(
    header: LookupHeader,
    rows: impl IntoIterator<Item = (usize, &'a str)>,
    diagnostics: &mut Diagnostics,
) -> TagTables {
    let mut index = TagIndex::new();
    let mut tag_counts = TagCounts::with_untagged();
    let mut key_counts = KeyCounts::new();

    for (line_no, row) in rows {
        let tokens = split_line(row, Delimiter::Comma);
        if tokens.is_empty() {
            continue;
        }

        if tokens.len() != header.len() {
            diagnostics.malformed_row(Source::Lookup, line_no, row, header.len(), tokens.len());
            continue;
        }

        let rule = header.rule_for(&tokens);

        tag_counts.seed(rule.tag.as_str());
        key_counts.seed(&rule.key);

        let key = rule.key.clone();
        let tag = rule.tag.clone();
        if let Some(previous) = index.insert(rule) {
            if previous != tag {
                diagnostics.duplicate_key(line_no, &key, &previous, &tag);
            }
        }
    }

    tracing::debug!(
        rules = index.len(),
        tags = tag_counts.len().saturating_sub(1),
        "built tag index"
    );

    TagTables {
        header,
        index,
        tag_counts,
        key_counts,
    }
}
