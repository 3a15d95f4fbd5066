use super::report::{Diagnostic, Diagnostics, Severity, Source};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Serialize)]
struct DiagnosticsJson<'a> {
    errors: Vec<&'a Diagnostic>,
    warnings: Vec<&'a Diagnostic>,
}

fn location(diagnostic: &Diagnostic) -> String {
    match diagnostic.line {
        Some(line) => format!("{}:{}", diagnostic.source, line),
        None => diagnostic.source.to_string(),
    }
}

impl Diagnostics {
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        let json = DiagnosticsJson {
            errors: self.errors().collect(),
            warnings: self.warnings().collect(),
        };

        serde_json::to_string_pretty(&json)
    }

    pub fn render_plain(&self) -> String {
        let mut out = String::new();

        for diagnostic in self.iter() {
            let severity = match diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            let _ = writeln!(
                out,
                "{}: {}: {}",
                location(diagnostic),
                severity,
                diagnostic.message
            );

            if let Some(content) = &diagnostic.content {
                let _ = writeln!(out, "  row: {content}");
            }
        }

        out
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();

        let errors = self.errors().count();
        let warnings = self.warnings().count();

        if errors == 0 && warnings == 0 {
            let _ = writeln!(out, "{}", "no diagnostics".green());
            return out;
        }

        let _ = writeln!(out, "{errors} errors, {warnings} warnings\n");

        let mut by_source: BTreeMap<Source, Vec<&Diagnostic>> = BTreeMap::new();
        for diagnostic in self.iter() {
            by_source.entry(diagnostic.source).or_default().push(diagnostic);
        }

        for (source, diagnostics) in by_source {
            let _ = writeln!(out, "{}", source.bold());

            for diagnostic in diagnostics {
                let label = match diagnostic.severity {
                    Severity::Error => "error".red().bold().to_string(),
                    Severity::Warning => "warning".yellow().bold().to_string(),
                };

                match diagnostic.line {
                    Some(line) => {
                        let _ = writeln!(out, "  {label} (line {line}): {}", diagnostic.message);
                    }
                    None => {
                        let _ = writeln!(out, "  {label}: {}", diagnostic.message);
                    }
                }

                if let Some(content) = &diagnostic.content {
                    let _ = writeln!(out, "    {}", content.dimmed());
                }
            }

            out.push('\n');
        }

        out
    }
}
