//! Data types produced by the extraction stages.
//!
//! Everything here is transient: built during one run, written to disk,
//! then dropped.

mod image;
mod summary;
mod text;

pub use image::{ExtractedImage, FailedImage, ImageExtraction, ImageOutcome, PixelMode};
pub use summary::{OutputDirectories, RunSummary};
pub use text::{PageText, TextDocument};
