use crate::conf::error::{ConfigError, LayoutFormat};
use crate::conf::layout::FieldLayout;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct LayoutFile(BTreeMap<String, usize>);

/// Returns the layout override when one is given, otherwise the default.
pub fn resolve_layout(path: Option<&Path>) -> Result<FieldLayout, ConfigError> {
    match path {
        Some(path) => load_layout(path),
        None => {
            tracing::debug!("using default flow log layout");
            Ok(FieldLayout::default())
        }
    }
}

/// Loads a layout override file.
///
/// The format follows the file extension: `.yaml`/`.yml` and `.toml` are
/// recognised, everything else is read as JSON.
pub fn load_layout(path: &Path) -> Result<FieldLayout, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let format = format_for(path);
    let layout = parse_layout(&s, format, path)?;

    tracing::info!(
        path = %path.display(),
        %format,
        fields = layout.len(),
        "loaded layout override"
    );

    Ok(layout)
}

pub fn parse_layout(
    s: &str,
    format: LayoutFormat,
    path: &Path,
) -> Result<FieldLayout, ConfigError> {
    let parsed: LayoutFile = match format {
        LayoutFormat::Json => {
            serde_json::from_str(s).map_err(|e| ConfigError::parse(path, format, e))?
        }
        LayoutFormat::Yaml => {
            serde_yaml::from_str(s).map_err(|e| ConfigError::parse(path, format, e))?
        }
        LayoutFormat::Toml => toml::from_str(s).map_err(|e| ConfigError::parse(path, format, e))?,
    };

    FieldLayout::from_mapping(parsed.0)
}

pub fn format_for(path: &Path) -> LayoutFormat {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("yaml") | Some("yml") => LayoutFormat::Yaml,
        Some("toml") => LayoutFormat::Toml,
        _ => LayoutFormat::Json,
    }
}
