use std::collections::HashMap;
use std::fmt;

/// Ordered field values identifying a lookup rule, e.g. `("443", "tcp")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyTuple(Vec<String>);

impl KeyTuple {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeyTuple {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Comma-joined, the way keys appear in the combination report.
impl fmt::Display for KeyTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// One data row of the lookup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub key: KeyTuple,
    pub tag: String,
}

/// Key → tag. Built once from the lookup file and only read afterwards.
#[derive(Debug, Default, Clone)]
pub struct TagIndex {
    rules: HashMap<KeyTuple, String, ahash::RandomState>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule. A repeated key keeps the newest tag; the replaced
    /// tag is returned.
    pub fn insert(&mut self, rule: TagRule) -> Option<String> {
        self.rules.insert(rule.key, rule.tag)
    }

    pub fn get(&self, key: &KeyTuple) -> Option<&str> {
        self.rules.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &KeyTuple) -> bool {
        self.rules.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
