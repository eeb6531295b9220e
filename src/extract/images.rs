//! Embedded image extraction.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::decode::decode_image;
use super::source::{ImageXObject, PdfSource};
use crate::error::Result;
use crate::layout::embedded_image_filename;
use crate::model::{ExtractedImage, FailedImage, ImageExtraction, ImageOutcome};
use crate::progress::{ProgressObserver, Stage};

/// Extracts every image XObject of a document as PNG.
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    output_dir: PathBuf,
    stem: String,
}

impl ImageExtractor {
    /// Write images named `<stem>_page<N>_img<K>.png` into `output_dir`.
    ///
    /// The directory is created on the first successful image.
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stem: stem.into(),
        }
    }

    /// Extract all images of `pdf`.
    ///
    /// Failures of individual images are recorded as
    /// [`ImageOutcome::Failed`] and never stop the walk. An error is only
    /// returned when the document itself cannot be opened.
    pub fn extract(
        &self,
        pdf: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<ImageExtraction> {
        let source = PdfSource::open(pdf)?;
        observer.document_opened(Stage::EmbeddedImages, pdf, source.page_count());

        let mut extraction = ImageExtraction::new();
        let mut next_index = 0usize;

        for (page_num, page_id) in source.pages() {
            let images = match source.page_images(page_id) {
                Ok(images) => images,
                Err(e) => {
                    log::warn!("page {}: cannot read resources: {}", page_num, e);
                    continue;
                }
            };

            for xobject in images {
                let outcome = match self.save_image(&source, page_num, next_index, &xobject) {
                    Ok(image) => {
                        next_index += 1;
                        observer.image_extracted(&image);
                        ImageOutcome::Extracted(image)
                    }
                    Err(e) => {
                        log::warn!("page {}: failed to extract {}: {}", page_num, xobject.name, e);
                        let failure = FailedImage {
                            page: page_num,
                            name: xobject.name.clone(),
                            reason: e.to_string(),
                        };
                        observer.image_failed(&failure);
                        ImageOutcome::Failed(failure)
                    }
                };
                extraction.push(outcome);
            }
        }

        Ok(extraction)
    }

    fn save_image(
        &self,
        source: &PdfSource,
        page: u32,
        index: usize,
        xobject: &ImageXObject<'_>,
    ) -> Result<ExtractedImage> {
        let decoded = decode_image(source, xobject.stream)?;

        fs::create_dir_all(&self.output_dir)?;
        let filename = embedded_image_filename(&self.stem, page, index);
        let path = self.output_dir.join(&filename);
        decoded.image.save_with_format(&path, ImageFormat::Png)?;

        log::debug!(
            "saved {} ({}x{}, {})",
            filename,
            decoded.width(),
            decoded.height(),
            decoded.mode
        );

        Ok(ExtractedImage {
            page,
            index,
            width: decoded.width(),
            height: decoded.height(),
            mode: decoded.mode,
            filename,
            path,
        })
    }
}
