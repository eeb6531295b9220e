//! Per-page plain text extraction.

use std::path::Path;

use super::source::PdfSource;
use crate::error::Result;
use crate::layout::pdf_filename;
use crate::model::TextDocument;
use crate::progress::{ProgressObserver, Stage};

/// Extract the text of every page of `pdf`.
///
/// Layout is whatever lopdf's text extraction produces. Any failure, on
/// open or on a single page, fails the whole document; a partially filled
/// [`TextDocument`] is never returned.
pub fn extract_text(pdf: &Path, observer: &mut dyn ProgressObserver) -> Result<TextDocument> {
    let source = PdfSource::open(pdf)?;
    let pages = source.pages();
    observer.document_opened(Stage::Text, pdf, pages.len() as u32);

    let mut document = TextDocument::new(pdf_filename(pdf), pages.len() as u32);
    for page_num in pages.keys() {
        let text = source.page_text(*page_num)?;
        document.push_page(text);
    }

    Ok(document)
}
