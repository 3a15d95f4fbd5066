//! IANA protocol number → canonical lowercase name.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const PROTOCOLS: &[(&str, &str)] = &[
    ("6", "tcp"),
    ("17", "udp"),
    ("1", "icmp"),
    ("2", "igmp"),
    ("4", "ipip"),
    ("132", "sctp"),
    ("50", "esp"),
    ("51", "ah"),
    ("88", "eigrp"),
    ("89", "ospf"),
];

static BY_CODE: Lazy<HashMap<&'static str, &'static str, ahash::RandomState>> =
    Lazy::new(|| PROTOCOLS.iter().copied().collect());

static BY_NAME: Lazy<HashMap<&'static str, &'static str, ahash::RandomState>> =
    Lazy::new(|| PROTOCOLS.iter().map(|(code, name)| (*name, *code)).collect());

/// What the classifier does with a protocol code missing from the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownProtocolPolicy {
    /// Keep the raw token in the key and record a warning.
    #[default]
    PassThrough,
    /// Fail the record.
    Reject,
}

/// Normalizes a protocol token.
///
/// Numeric codes from the table map to their name. A token that already is
/// a known name, in any case, maps to its canonical lowercase form.
/// Anything else is `None`.
pub fn normalize(token: &str) -> Option<&'static str> {
    BY_CODE.get(token).copied().or_else(|| {
        PROTOCOLS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(token))
            .map(|(_, name)| *name)
    })
}

pub fn name_of(code: &str) -> Option<&'static str> {
    BY_CODE.get(code).copied()
}

pub fn code_of(name: &str) -> Option<&'static str> {
    BY_NAME.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_names() {
        assert_eq!(normalize("6"), Some("tcp"));
        assert_eq!(normalize("17"), Some("udp"));
        assert_eq!(normalize("132"), Some("sctp"));
        assert_eq!(normalize("89"), Some("ospf"));
    }

    #[test]
    fn canonical_names_pass_unchanged() {
        assert_eq!(normalize("tcp"), Some("tcp"));
        assert_eq!(normalize("icmp"), Some("icmp"));
        assert_eq!(normalize("TCP"), Some("tcp"));
    }

    #[test]
    fn unknown_codes_are_none() {
        assert_eq!(normalize("255"), None);
        assert_eq!(normalize("6.0"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(code_of("udp"), Some("17"));
        assert_eq!(name_of("50"), Some("esp"));
        assert_eq!(code_of("quic"), None);
    }
}
