//! Extracted text document.

use serde::{Deserialize, Serialize};

/// Plain text of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page: u32,

    /// Extracted text, as produced by the text extraction routine
    pub text: String,
}

/// Text of a whole document, serialized as `<stem>_text.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDocument {
    /// Source filename including extension
    pub filename: String,

    /// Number of pages in the document
    pub pages: u32,

    /// Per-page text in page order
    pub content: Vec<PageText>,
}

impl TextDocument {
    /// Create an empty text document for a file with `pages` pages.
    pub fn new(filename: impl Into<String>, pages: u32) -> Self {
        Self {
            filename: filename.into(),
            pages,
            content: Vec::with_capacity(pages as usize),
        }
    }

    /// Append the next page. Page numbers follow insertion order.
    pub fn push_page(&mut self, text: impl Into<String>) {
        let page = self.content.len() as u32 + 1;
        self.content.push(PageText {
            page,
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_page_numbers() {
        let mut doc = TextDocument::new("a.pdf", 2);
        doc.push_page("first");
        doc.push_page("second");

        assert_eq!(doc.content.len(), 2);
        assert_eq!(doc.content[0].page, 1);
        assert_eq!(doc.content[0].text, "first");
        assert_eq!(doc.content[1].page, 2);
    }

    #[test]
    fn test_json_shape() {
        let mut doc = TextDocument::new("Katalog.pdf", 1);
        doc.push_page("Türschloss");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"filename":"Katalog.pdf","pages":1,"content":[{"page":1,"text":"Türschloss"}]}"#
        );
    }
}
