//! Flow log tagging.
//!
//! Records of a flow log are matched against a lookup table keyed on a
//! tuple of record fields (for example destination port and protocol).
//! Two tallies come out of a run: how many records each tag received, and
//! how often each key combination occurred.

pub mod cli;
pub mod conf;
pub mod diagnostics;
pub mod logging;
pub mod pipeline;
pub mod protocol;
pub mod report;
pub mod tagging;
pub mod tokenize;
