//! Embedded image records and extraction outcomes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the raw samples of an embedded image were interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelMode {
    /// Three 8-bit channels
    Rgb,
    /// One channel (gray or stencil mask)
    Gray,
    /// Four channels, converted to RGB
    Cmyk,
    /// Palette indices expanded through the lookup table
    Indexed,
    /// DCT-encoded stream decoded by the JPEG decoder
    Jpeg,
}

impl std::fmt::Display for PixelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelMode::Rgb => write!(f, "RGB"),
            PixelMode::Gray => write!(f, "L"),
            PixelMode::Cmyk => write!(f, "CMYK"),
            PixelMode::Indexed => write!(f, "P"),
            PixelMode::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// An embedded image written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// Page number (1-indexed)
    pub page: u32,

    /// Document-wide counter of extracted images (0-based)
    pub index: usize,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Sample interpretation
    pub mode: PixelMode,

    /// Output filename
    pub filename: String,

    /// Full output path
    pub path: PathBuf,
}

/// An embedded image that could not be reconstructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedImage {
    /// Page number (1-indexed)
    pub page: u32,

    /// XObject resource name (e.g. "Im1")
    pub name: String,

    /// Error description
    pub reason: String,
}

/// Result of processing a single image XObject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Extracted(ExtractedImage),
    Failed(FailedImage),
}

impl ImageOutcome {
    pub fn is_extracted(&self) -> bool {
        matches!(self, ImageOutcome::Extracted(_))
    }
}

/// All per-image outcomes of one document, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageExtraction {
    pub outcomes: Vec<ImageOutcome>,
}

impl ImageExtraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: ImageOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of images written to disk.
    pub fn extracted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_extracted()).count()
    }

    /// Number of images that failed to decode or save.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.extracted_count()
    }

    /// Successfully extracted images.
    pub fn extracted(&self) -> impl Iterator<Item = &ExtractedImage> {
        self.outcomes.iter().filter_map(|o| match o {
            ImageOutcome::Extracted(img) => Some(img),
            ImageOutcome::Failed(_) => None,
        })
    }

    /// Images that could not be extracted.
    pub fn failures(&self) -> impl Iterator<Item = &FailedImage> {
        self.outcomes.iter().filter_map(|o| match o {
            ImageOutcome::Failed(f) => Some(f),
            ImageOutcome::Extracted(_) => None,
        })
    }
}
