//! Collected, non-fatal findings of a run.
//!
//! Everything the pipeline recovers from locally ends up here instead of
//! being printed and forgotten: malformed rows, unknown protocols, records
//! that were too short to classify and reports that could not be written.
//! Each finding is mirrored as a `tracing` event at the time it is
//! recorded, so a subscriber sees the same stream the caller inspects.

mod render;
mod report;

pub use report::*;
