//! Analysis options and configuration.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Output root used when none is given on the command line.
pub const DEFAULT_OUTPUT_DIR: &str = "references/extracted";

/// Page rendering resolution, print quality.
pub const DEFAULT_DPI: u32 = 300;

/// Options for analyzing a PDF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Base directory; outputs land in `<output_dir>/<pdf_stem>/`
    pub output_dir: PathBuf,

    /// Resolution for page renders
    pub dpi: u32,
}

impl AnalyzeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output base directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the page rendering resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Output base directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Check that the options can be used for a run.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(Error::InvalidOption("dpi must be greater than zero".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::InvalidOption("output directory is empty".into()));
        }
        Ok(())
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dpi: DEFAULT_DPI,
        }
    }
}
