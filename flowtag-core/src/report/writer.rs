use crate::diagnostics::Diagnostics;
use crate::report::error::ReportError;
use crate::tagging::{KeyCounts, TagCounts};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TAG_COUNTS_FILE: &str = "tag_counts.txt";
pub const KEY_COUNTS_FILE: &str = "port_protocol_comb.txt";

pub fn write_tag_counts<W: Write>(mut out: W, tag_counts: &TagCounts) -> io::Result<()> {
    out.write_all(b"Tag Counts: \nTag,Count \n")?;
    for (tag, count) in tag_counts.iter() {
        writeln!(out, "{tag},{count}")?;
    }
    out.flush()
}

pub fn write_key_counts<W: Write>(mut out: W, key_counts: &KeyCounts) -> io::Result<()> {
    out.write_all(b"Port/Protocol Combination Counts:\nPort,Protocol,Count\n")?;
    for (key, count) in key_counts.iter() {
        writeln!(out, "{key},{count}")?;
    }
    out.flush()
}

/// Paths of the reports that were written successfully.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub tag_counts: Option<PathBuf>,
    pub key_counts: Option<PathBuf>,
}

/// Writes both reports into `dir`.
///
/// A failing report is logged and recorded in `diagnostics`; the other
/// report is still attempted.
pub fn write_reports(
    dir: &Path,
    tag_counts: &TagCounts,
    key_counts: &KeyCounts,
    diagnostics: &mut Diagnostics,
) -> WrittenReports {
    let tag_path = dir.join(TAG_COUNTS_FILE);
    let key_path = dir.join(KEY_COUNTS_FILE);

    WrittenReports {
        tag_counts: record(
            write_report_file(&tag_path, |out| write_tag_counts(out, tag_counts)),
            diagnostics,
        ),
        key_counts: record(
            write_report_file(&key_path, |out| write_key_counts(out, key_counts)),
            diagnostics,
        ),
    }
}

/// Creates (or truncates) `path` and hands a buffered writer to `write`.
pub fn write_report_file(
    path: &Path,
    write: impl FnOnce(BufWriter<File>) -> io::Result<()>,
) -> Result<PathBuf, ReportError> {
    File::create(path)
        .and_then(|file| write(BufWriter::new(file)))
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "report written");
    Ok(path.to_path_buf())
}

fn record(result: Result<PathBuf, ReportError>, diagnostics: &mut Diagnostics) -> Option<PathBuf> {
    match result {
        Ok(path) => Some(path),
        Err(ReportError::Io { path, source }) => {
            diagnostics.io_failure(&path, &source);
            None
        }
    }
}
