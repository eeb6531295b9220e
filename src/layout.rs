//! Output directory layout and file naming.
//!
//! All outputs for one document live under `<output_dir>/<pdf_stem>/`:
//!
//! ```text
//! images/<stem>_page<N>_img<K>.png
//! pages/<stem>_page<N>.png
//! text/<stem>_text.json
//! summary.json
//! ```

use std::path::{Path, PathBuf};

/// Name of the embedded image directory.
pub const IMAGES_DIR: &str = "images";
/// Name of the page render directory.
pub const PAGES_DIR: &str = "pages";
/// Name of the extracted text directory.
pub const TEXT_DIR: &str = "text";
/// Name of the run summary file.
pub const SUMMARY_FILE: &str = "summary.json";

/// Filename of an embedded image. `page` is 1-based, `index` is the
/// document-wide counter of extracted images.
pub fn embedded_image_filename(stem: &str, page: u32, index: usize) -> String {
    format!("{}_page{}_img{}.png", stem, page, index)
}

/// Filename of a rendered page. `page` is 1-based.
pub fn page_render_filename(stem: &str, page: u32) -> String {
    format!("{}_page{}.png", stem, page)
}

/// Filename of the extracted text document.
pub fn text_filename(stem: &str) -> String {
    format!("{}_text.json", stem)
}

/// The input filename without directory or extension.
pub fn pdf_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// The input filename with its extension.
pub fn pdf_filename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resolved output paths for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    stem: String,
    root: PathBuf,
}

impl OutputLayout {
    /// Layout for `pdf_path` under the `output_dir` base directory.
    pub fn new(output_dir: &Path, pdf_path: &Path) -> Self {
        let stem = pdf_stem(pdf_path);
        let root = output_dir.join(&stem);
        Self { stem, root }
    }

    /// Document stem used as the filename prefix.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// `<output_dir>/<stem>`
    pub fn document_dir(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(PAGES_DIR)
    }

    pub fn text_dir(&self) -> PathBuf {
        self.root.join(TEXT_DIR)
    }

    pub fn text_file(&self) -> PathBuf {
        self.text_dir().join(text_filename(&self.stem))
    }

    pub fn summary_file(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        assert_eq!(
            embedded_image_filename("catalog", 3, 7),
            "catalog_page3_img7.png"
        );
        assert_eq!(page_render_filename("catalog", 1), "catalog_page1.png");
        assert_eq!(text_filename("catalog"), "catalog_text.json");
    }

    #[test]
    fn test_stem_and_filename() {
        let path = Path::new("references/pdf/Smart-Lock-2025.pdf");
        assert_eq!(pdf_stem(path), "Smart-Lock-2025");
        assert_eq!(pdf_filename(path), "Smart-Lock-2025.pdf");
    }

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new(Path::new("out"), Path::new("in/brochure.pdf"));
        assert_eq!(layout.stem(), "brochure");
        assert_eq!(layout.document_dir(), Path::new("out/brochure"));
        assert_eq!(layout.images_dir(), Path::new("out/brochure/images"));
        assert_eq!(layout.pages_dir(), Path::new("out/brochure/pages"));
        assert_eq!(
            layout.text_file(),
            Path::new("out/brochure/text/brochure_text.json")
        );
        assert_eq!(layout.summary_file(), Path::new("out/brochure/summary.json"));
    }
}
