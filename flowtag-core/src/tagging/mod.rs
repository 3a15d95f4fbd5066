//! Lookup-table driven tagging of flow log records.
//!
//! The lookup file becomes a [`TagIndex`] plus two seeded counters
//! ([`build_tag_tables`]); a [`Classifier`] then derives the same kind of
//! key from every log record and tallies it.

mod builder;
mod classifier;
mod counts;
mod error;
mod header;
mod index;
#[cfg(test)]
mod tests;

pub use builder::*;
pub use classifier::*;
pub use counts::*;
pub use error::*;
pub use header::*;
pub use index::*;
