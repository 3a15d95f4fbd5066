use crate::cli::Cli;
use crate::logging::DiagnosticsFormat;
use crate::pipeline::run_files;
use crate::report::write_reports;
use anyhow::Result;
use std::fs;

/// Runs one classification and writes both reports.
///
/// Configuration, missing input and strict classification failures are
/// returned as errors. Report write failures are not: they are logged and
/// show up in the diagnostics.
pub fn run(cli: &Cli) -> Result<()> {
    let mut outcome = run_files(
        &cli.lookup_file,
        &cli.log_file,
        cli.layout_file.as_deref(),
        cli.classify_options(),
    )?;

    if let Err(e) = fs::create_dir_all(&cli.output_dir) {
        tracing::error!(
            error = %e,
            dir = %cli.output_dir.display(),
            "failed to create output directory"
        );
    }

    write_reports(
        &cli.output_dir,
        &outcome.tag_counts,
        &outcome.key_counts,
        &mut outcome.diagnostics,
    );

    let rendered = match cli.diagnostics_format() {
        DiagnosticsFormat::Plain => outcome.diagnostics.render_plain(),
        DiagnosticsFormat::Pretty => outcome.diagnostics.render_pretty(),
        DiagnosticsFormat::Json => outcome.diagnostics.render_json()?,
    };
    print!("{rendered}");

    Ok(())
}
