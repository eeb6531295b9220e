//! Run summary written as `summary.json`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::layout::{pdf_filename, OutputLayout};

use super::TextDocument;

/// Output directory of each category, `None` when the category produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDirectories {
    pub embedded_images: Option<String>,
    pub page_images: Option<String>,
    pub text_content: Option<String>,
}

/// What a run produced and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Source filename including extension
    pub pdf_file: String,

    /// Number of embedded images extracted
    pub embedded_images: usize,

    /// Number of pages rendered
    pub pages_converted: usize,

    /// Page count reported by text extraction (0 if it failed)
    pub total_pages: u32,

    /// `<output_dir>/<stem>`
    pub output_directory: String,

    pub directories: OutputDirectories,
}

impl RunSummary {
    /// Build the summary from the stage results.
    pub fn new(
        pdf_path: &Path,
        layout: &OutputLayout,
        embedded_images: usize,
        pages_converted: usize,
        text: Option<&TextDocument>,
    ) -> Self {
        Self {
            pdf_file: pdf_filename(pdf_path),
            embedded_images,
            pages_converted,
            total_pages: text.map_or(0, |t| t.pages),
            output_directory: path_string(layout.document_dir()),
            directories: OutputDirectories {
                embedded_images: dir_if(embedded_images > 0, &layout.images_dir()),
                page_images: dir_if(pages_converted > 0, &layout.pages_dir()),
                text_content: dir_if(text.is_some(), &layout.text_dir()),
            },
        }
    }
}

fn dir_if(present: bool, dir: &Path) -> Option<String> {
    present.then(|| path_string(dir))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
