//! Layout → lookup index → classification, end to end.

mod error;
mod run;

pub use error::{InputRole, PipelineError};
pub use run::{Outcome, run_files, run_text};
