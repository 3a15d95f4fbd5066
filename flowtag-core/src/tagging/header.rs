use crate::conf::{ConfigError, PROTOCOL_FIELD};
use crate::protocol;
use crate::tagging::index::{KeyTuple, TagRule};
use crate::tokenize::{Delimiter, split_line};

pub const TAG_FIELD: &str = "tag";

/// The header row of a lookup file: field names in column order, exactly
/// one of which is `tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupHeader {
    fields: Vec<String>,
    tag_position: usize,
    protocol_position: Option<usize>,
}

impl LookupHeader {
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        let fields: Vec<String> = split_line(line, Delimiter::Comma)
            .into_iter()
            .map(str::to_string)
            .collect();

        if fields.is_empty() {
            return Err(ConfigError::EmptyLookup);
        }

        let mut tags = fields
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() == TAG_FIELD)
            .map(|(position, _)| position);

        let Some(tag_position) = tags.next() else {
            return Err(ConfigError::MissingTagColumn {
                header: line.trim().to_string(),
            });
        };

        if tags.next().is_some() {
            return Err(ConfigError::DuplicateTagColumn {
                header: line.trim().to_string(),
            });
        }

        let protocol_position = fields.iter().position(|name| name == PROTOCOL_FIELD);

        Ok(Self {
            fields,
            tag_position,
            protocol_position,
        })
    }

    /// Number of columns, including `tag`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn tag_position(&self) -> usize {
        self.tag_position
    }

    /// Non-tag field names in header order. This order defines the key.
    pub fn key_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .enumerate()
            .filter(move |(position, _)| *position != self.tag_position)
            .map(|(_, name)| name.as_str())
    }

    /// Pairs a data row with the header. The caller guarantees
    /// `tokens.len() == self.len()`.
    ///
    /// A `protocol` value is normalized the same way log records are, so a
    /// rule may name the protocol either by number or by name. Values that
    /// are neither are kept verbatim.
    pub fn rule_for(&self, tokens: &[&str]) -> TagRule {
        let key: KeyTuple = tokens
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != self.tag_position)
            .map(|(position, value)| match self.protocol_position {
                Some(p) if p == position => protocol::normalize(value).map_or(*value, |name| name),
                _ => *value,
            })
            .collect();

        TagRule {
            key,
            tag: tokens[self.tag_position].to_string(),
        }
    }
}
