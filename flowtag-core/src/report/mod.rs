mod error;
mod writer;

pub use error::ReportError;
pub use writer::*;
