use clap::Parser;
use flowtag_core::cli::{self, Cli};
use flowtag_core::report::{KEY_COUNTS_FILE, TAG_COUNTS_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding the inputs and outputs of one CLI run.
pub struct Workspace {
    dir: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copies a file from `fixtures/` into the workspace.
    pub fn fixture(&self, name: &str) -> PathBuf {
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name);

        assert!(source.exists(), "fixture does not exist: {:?}", source);

        let target = self.path().join(name);
        fs::copy(&source, &target).expect("failed to copy fixture");
        target
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let target = self.path().join(name);
        fs::write(&target, contents).expect("failed to write input");
        target
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Parses `args` the way the binary does and runs the CLI with reports
    /// directed into [`Workspace::output_dir`].
    pub fn run(&self, args: &[&str]) -> Result<(), String> {
        let out = self.output_dir();
        let out = out.to_str().expect("non-utf8 temp dir");

        let mut argv = vec!["flowtag", "--output-dir", out];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv).map_err(|e| e.to_string())?;
        cli::run(&cli).map_err(|e| format!("{e:#}"))
    }

    pub fn tag_report(&self) -> String {
        fs::read_to_string(self.output_dir().join(TAG_COUNTS_FILE)).expect("missing tag report")
    }

    pub fn combination_report(&self) -> String {
        fs::read_to_string(self.output_dir().join(KEY_COUNTS_FILE))
            .expect("missing combination report")
    }
}
