//! The three-stage analysis run.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extract::{extract_text, ImageExtractor};
use crate::json::write_json;
use crate::layout::OutputLayout;
use crate::model::{ImageExtraction, RunSummary, TextDocument};
use crate::options::AnalyzeOptions;
use crate::progress::{ProgressObserver, SilentObserver, Stage};
use crate::raster::{DefaultRasterizer, PageRasterizer, PageRenderer};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The summary as written to `summary.json`
    pub summary: RunSummary,
    pub summary_path: PathBuf,
    /// Per-image outcomes of the embedded image stage
    pub images: ImageExtraction,
    /// The text document, if text extraction succeeded
    pub text: Option<TextDocument>,
}

/// Runs embedded image extraction, page rendering and text extraction on a
/// PDF and writes their results under `<output_dir>/<stem>/`.
///
/// Stage failures never abort a run: a failed stage contributes zero (or no
/// text) and the next stage runs. Only a missing input, invalid options or a
/// failure to write the JSON outputs is returned as an error.
pub struct Analyzer<R = DefaultRasterizer> {
    options: AnalyzeOptions,
    rasterizer: R,
}

impl Analyzer<DefaultRasterizer> {
    /// Analyzer with the default rendering engine.
    pub fn new(options: AnalyzeOptions) -> Self {
        Self::with_rasterizer(options, DefaultRasterizer::default())
    }
}

impl<R: PageRasterizer> Analyzer<R> {
    /// Analyzer rendering pages with `rasterizer`.
    pub fn with_rasterizer(options: AnalyzeOptions, rasterizer: R) -> Self {
        Self {
            options,
            rasterizer,
        }
    }

    /// Analyze `pdf`, reporting progress to `observer`.
    pub fn analyze(&self, pdf: &Path, observer: &mut dyn ProgressObserver) -> Result<Analysis> {
        self.options.validate()?;
        if !pdf.is_file() {
            return Err(Error::FileNotFound(pdf.to_path_buf()));
        }

        let layout = OutputLayout::new(self.options.output_dir(), pdf);
        log::info!(
            "analyzing {} into {}",
            pdf.display(),
            layout.document_dir().display()
        );
        observer.run_started(pdf);

        let images = self.extract_images(pdf, &layout, observer);
        let pages_converted = self.render_pages(pdf, &layout, observer);
        let text = self.extract_text(pdf, observer);

        if let Some(doc) = &text {
            let text_file = layout.text_file();
            write_json(&text_file, doc)?;
            observer.text_saved(&text_file);
        }

        let summary = RunSummary::new(
            pdf,
            &layout,
            images.extracted_count(),
            pages_converted,
            text.as_ref(),
        );
        let summary_path = layout.summary_file();
        write_json(&summary_path, &summary)?;
        log::info!(
            "{}: {} images, {} pages rendered, {} text pages",
            summary.pdf_file,
            summary.embedded_images,
            summary.pages_converted,
            summary.total_pages
        );
        observer.run_finished(&summary, &summary_path);

        Ok(Analysis {
            summary,
            summary_path,
            images,
            text,
        })
    }

    fn extract_images(
        &self,
        pdf: &Path,
        layout: &OutputLayout,
        observer: &mut dyn ProgressObserver,
    ) -> ImageExtraction {
        let stage = Stage::EmbeddedImages;
        observer.stage_started(stage);

        let extractor = ImageExtractor::new(layout.images_dir(), layout.stem());
        match extractor.extract(pdf, observer) {
            Ok(extraction) => {
                if extraction.failed_count() > 0 {
                    log::warn!("{} embedded images could not be extracted", extraction.failed_count());
                }
                observer.stage_finished(stage, extraction.extracted_count());
                extraction
            }
            Err(e) => {
                log::error!("embedded image extraction failed: {}", e);
                observer.stage_failed(stage, &e);
                ImageExtraction::new()
            }
        }
    }

    fn render_pages(
        &self,
        pdf: &Path,
        layout: &OutputLayout,
        observer: &mut dyn ProgressObserver,
    ) -> usize {
        let stage = Stage::PageImages;
        observer.stage_started(stage);

        let renderer = PageRenderer::new(layout.pages_dir(), layout.stem(), self.options.dpi);
        match renderer.render(&self.rasterizer, pdf, observer) {
            Ok(count) => {
                observer.stage_finished(stage, count);
                count
            }
            Err(e) => {
                log::error!("page rendering failed: {}", e);
                observer.stage_failed(stage, &e);
                0
            }
        }
    }

    fn extract_text(&self, pdf: &Path, observer: &mut dyn ProgressObserver) -> Option<TextDocument> {
        let stage = Stage::Text;
        observer.stage_started(stage);

        match extract_text(pdf, observer) {
            Ok(doc) => {
                observer.stage_finished(stage, doc.content.len());
                Some(doc)
            }
            Err(e) => {
                log::error!("text extraction failed: {}", e);
                observer.stage_failed(stage, &e);
                None
            }
        }
    }
}

/// Analyze `pdf` with default settings apart from the output directory.
///
/// ```no_run
/// let analysis = pdfharvest::analyze_pdf("report.pdf", "references/extracted")?;
/// println!("{} images", analysis.summary.embedded_images);
/// # Ok::<(), pdfharvest::Error>(())
/// ```
pub fn analyze_pdf(pdf: impl AsRef<Path>, output_dir: impl Into<PathBuf>) -> Result<Analysis> {
    let options = AnalyzeOptions::new().with_output_dir(output_dir);
    Analyzer::new(options).analyze(pdf.as_ref(), &mut SilentObserver)
}
