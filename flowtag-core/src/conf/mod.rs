mod error;
mod layout;
mod loader;

pub use error::{ConfigError, LayoutFormat};
pub use layout::{ColumnResolution, DEFAULT_FIELDS, FieldLayout, KeyColumn, PROTOCOL_FIELD};
pub use loader::{format_for, load_layout, parse_layout, resolve_layout};
