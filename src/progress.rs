//! Progress reporting hooks for an analysis run.
//!
//! The library never prints. Callers that want feedback implement
//! [`ProgressObserver`]; every method has an empty default, so an observer
//! only overrides what it cares about.
//!
//! # Example
//!
//! ```
//! use pdfharvest::model::ExtractedImage;
//! use pdfharvest::progress::ProgressObserver;
//!
//! struct CountImages(usize);
//!
//! impl ProgressObserver for CountImages {
//!     fn image_extracted(&mut self, _image: &ExtractedImage) {
//!         self.0 += 1;
//!     }
//! }
//! ```

use std::path::Path;

use crate::error::Error;
use crate::model::{ExtractedImage, FailedImage, RunSummary};

/// The three extraction stages, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    EmbeddedImages,
    PageImages,
    Text,
}

impl Stage {
    /// Number of stages in a run.
    pub const COUNT: usize = 3;

    /// All stages in run order.
    pub const ALL: [Stage; Stage::COUNT] = [Stage::EmbeddedImages, Stage::PageImages, Stage::Text];

    /// 1-based position in the run.
    pub fn number(self) -> usize {
        match self {
            Stage::EmbeddedImages => 1,
            Stage::PageImages => 2,
            Stage::Text => 3,
        }
    }

    /// Short description shown in stage headers.
    pub fn description(self) -> &'static str {
        match self {
            Stage::EmbeddedImages => "Extracting embedded images",
            Stage::PageImages => "Converting pages to images",
            Stage::Text => "Extracting text content",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}] {}", self.number(), Stage::COUNT, self.description())
    }
}

/// Receives progress events during [`Analyzer::analyze`](crate::Analyzer::analyze).
pub trait ProgressObserver {
    /// Called once before any stage runs.
    fn run_started(&mut self, pdf: &Path) {
        let _ = pdf;
    }

    fn stage_started(&mut self, stage: Stage) {
        let _ = stage;
    }

    /// A stage opened the document and found `pages` pages.
    fn document_opened(&mut self, stage: Stage, pdf: &Path, pages: u32) {
        let _ = (stage, pdf, pages);
    }

    fn image_extracted(&mut self, image: &ExtractedImage) {
        let _ = image;
    }

    fn image_failed(&mut self, failure: &FailedImage) {
        let _ = failure;
    }

    /// A page render was saved as `filename`.
    fn page_rendered(&mut self, page: u32, filename: &str) {
        let _ = (page, filename);
    }

    /// A stage failed as a whole and yields nothing.
    fn stage_failed(&mut self, stage: Stage, error: &Error) {
        let _ = (stage, error);
    }

    /// A stage completed; `count` is images, pages or text pages.
    fn stage_finished(&mut self, stage: Stage, count: usize) {
        let _ = (stage, count);
    }

    /// The text document was written.
    fn text_saved(&mut self, path: &Path) {
        let _ = path;
    }

    /// Called once after `summary.json` has been written.
    fn run_finished(&mut self, summary: &RunSummary, summary_path: &Path) {
        let _ = (summary, summary_path);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ProgressObserver for SilentObserver {}
