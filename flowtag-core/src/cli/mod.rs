mod args;
mod run;

pub use args::*;
pub use run::run;
