//! Document access shared by the lopdf-backed stages.
//!
//! Each stage opens its own [`PdfSource`]; nothing is shared between stages.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};

/// Parent chains deeper than this are treated as malformed.
const MAX_PARENT_DEPTH: usize = 32;

/// References to references are followed at most this many times.
const MAX_REFERENCE_HOPS: usize = 8;

/// An image XObject found in a page's resources.
#[derive(Debug)]
pub struct ImageXObject<'a> {
    /// Resource name (key in the XObject dictionary)
    pub name: String,
    /// The image stream
    pub stream: &'a Stream,
}

/// A PDF document loaded with lopdf.
pub struct PdfSource {
    doc: LopdfDocument,
}

impl PdfSource {
    /// Check the header and load the document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        if doc.is_encrypted() {
            log::warn!("{} is encrypted; extraction may fail", path.display());
        }
        Ok(Self { doc })
    }

    /// Load a document from an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// All pages as (page number → object id), page numbers 1-based.
    pub fn pages(&self) -> BTreeMap<u32, ObjectId> {
        self.doc.get_pages()
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Follow indirect references until a direct object is reached.
    pub fn resolve<'a>(&'a self, obj: &'a Object) -> Result<&'a Object> {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_HOPS {
            match current {
                Object::Reference(id) => current = self.doc.get_object(*id)?,
                _ => return Ok(current),
            }
        }
        Err(Error::PdfParse("reference chain too long".to_string()))
    }

    /// Look up `key` in `dict` and resolve the value.
    pub fn get_resolved<'a>(&'a self, dict: &'a Dictionary, key: &[u8]) -> Result<&'a Object> {
        let obj = dict
            .get(key)
            .map_err(|_| Error::MissingObject(String::from_utf8_lossy(key).into_owned()))?;
        self.resolve(obj)
    }

    /// The resource dictionary of a page, inherited from the page tree
    /// when the page itself has none.
    pub fn page_resources(&self, page_id: ObjectId) -> Result<Option<&Dictionary>> {
        let mut node = self.doc.get_dictionary(page_id)?;

        for _ in 0..MAX_PARENT_DEPTH {
            if let Ok(res) = self.get_resolved(node, b"Resources") {
                return Ok(Some(res.as_dict()?));
            }
            match node.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => node = self.doc.get_dictionary(parent)?,
                Err(_) => return Ok(None),
            }
        }

        Err(Error::PdfParse("page tree too deep".to_string()))
    }

    /// Image XObjects of a page, in resource dictionary order.
    ///
    /// Entries that cannot be resolved or are not images (forms, PostScript)
    /// are skipped.
    pub fn page_images(&self, page_id: ObjectId) -> Result<Vec<ImageXObject<'_>>> {
        let Some(resources) = self.page_resources(page_id)? else {
            return Ok(Vec::new());
        };
        let Ok(xobjects) = self.get_resolved(resources, b"XObject") else {
            return Ok(Vec::new());
        };
        let xobjects = xobjects.as_dict()?;

        let mut images = Vec::new();
        for (name, obj) in xobjects.iter() {
            let name = String::from_utf8_lossy(name).into_owned();
            let stream = match self.resolve(obj).and_then(|o| Ok(o.as_stream()?)) {
                Ok(stream) => stream,
                Err(e) => {
                    log::debug!("skipping XObject {}: {}", name, e);
                    continue;
                }
            };

            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .map(|n| n == b"Image")
                .unwrap_or(false);
            if is_image {
                images.push(ImageXObject { name, stream });
            } else {
                log::debug!("skipping non-image XObject {}", name);
            }
        }

        Ok(images)
    }

    /// Plain text of one page (1-based).
    pub fn page_text(&self, page_num: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }
}
