use crate::conf::error::ConfigError;
use std::collections::HashMap;

/// Column names of a version 2 VPC flow log record, in column order.
pub const DEFAULT_FIELDS: [&str; 14] = [
    "version",
    "account_id",
    "interface_id",
    "srcaddr",
    "dstaddr",
    "srcport",
    "dstport",
    "protocol",
    "packets",
    "bytes",
    "start",
    "end",
    "action",
    "log_status",
];

pub const PROTOCOL_FIELD: &str = "protocol";

/// Field name → zero-based column index of a flow log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    indices: HashMap<String, usize, ahash::RandomState>,
}

/// A lookup key field resolved against a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    pub name: String,
    pub index: usize,
    pub is_protocol: bool,
}

/// Result of mapping lookup header fields onto layout columns.
///
/// Fields that cannot be extracted from a record are not errors; they are
/// reported here so the caller can surface them and carry on with the
/// remaining columns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnResolution {
    pub columns: Vec<KeyColumn>,
    /// Header fields the layout does not define.
    pub unknown: Vec<String>,
    /// Header fields whose index is not below the layout's field count.
    pub out_of_range: Vec<(String, usize)>,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            indices: DEFAULT_FIELDS
                .iter()
                .enumerate()
                .map(|(index, name)| (name.to_string(), index))
                .collect(),
        }
    }
}

impl FieldLayout {
    /// Builds a layout from an arbitrary name → index mapping.
    ///
    /// # Errors
    ///
    /// `ConfigError::EmptyLayout` when no fields are given and
    /// `ConfigError::DuplicateIndex` when two names share a column.
    pub fn from_mapping<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, usize)> = entries
            .into_iter()
            .map(|(name, index)| (name.into(), index))
            .collect();

        if entries.is_empty() {
            return Err(ConfigError::EmptyLayout);
        }

        // sorted so the duplicate report is stable
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        for pair in entries.windows(2) {
            if pair[0].1 == pair[1].1 {
                return Err(ConfigError::DuplicateIndex {
                    index: pair[0].1,
                    first: pair[0].0.clone(),
                    second: pair[1].0.clone(),
                });
            }
        }

        Ok(Self {
            indices: entries.into_iter().collect(),
        })
    }

    /// Number of fields, which is also the expected token count per record.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.indices.get(field).copied()
    }

    pub fn protocol_index(&self) -> Option<usize> {
        self.index_of(PROTOCOL_FIELD)
    }

    /// Fields ordered by column.
    pub fn fields(&self) -> Vec<(&str, usize)> {
        let mut fields: Vec<_> = self
            .indices
            .iter()
            .map(|(name, index)| (name.as_str(), *index))
            .collect();
        fields.sort_by_key(|(_, index)| *index);
        fields
    }

    /// Resolves lookup key fields, in the given order, to record columns.
    pub fn resolve_columns<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> ColumnResolution {
        let protocol = self.protocol_index();
        let mut resolution = ColumnResolution::default();

        for name in names {
            match self.index_of(name) {
                None => resolution.unknown.push(name.to_string()),
                Some(index) if index >= self.len() => {
                    resolution.out_of_range.push((name.to_string(), index));
                }
                Some(index) => resolution.columns.push(KeyColumn {
                    name: name.to_string(),
                    index,
                    is_protocol: Some(index) == protocol,
                }),
            }
        }

        resolution
    }
}
