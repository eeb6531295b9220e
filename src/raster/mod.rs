//! Page rasterization.
//!
//! Rendering goes through the [`PageRasterizer`] trait so the stage logic
//! (naming, saving, counting) does not depend on a particular engine. With
//! the `render` feature the default engine is PDFium; without it every
//! render attempt fails with [`Error::RendererUnavailable`].

#[cfg(feature = "render")]
mod pdfium;

#[cfg(feature = "render")]
pub use pdfium::PdfiumRasterizer;

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};

use crate::error::{Error, Result};
use crate::layout::page_render_filename;
use crate::progress::ProgressObserver;

/// Points per inch in PDF user space.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// How to make the native rendering library available.
pub const INSTALL_HINT: &str = "\
Page rendering needs the PDFium shared library.
  - macOS:   download libpdfium.dylib from https://github.com/bblanchon/pdfium-binaries
             and place it next to the executable or in /usr/local/lib
  - Linux:   download libpdfium.so from https://github.com/bblanchon/pdfium-binaries
             and place it next to the executable or in /usr/lib
  - Windows: download pdfium.dll from https://github.com/bblanchon/pdfium-binaries
             and place it next to the executable";

/// One rendered page, handed to the caller before the next page is drawn.
pub struct PageRender {
    /// 1-based page number
    pub page: u32,
    pub image: DynamicImage,
}

/// Renders every page of a PDF file to a bitmap.
pub trait PageRasterizer {
    /// Engine name, for logging.
    fn name(&self) -> &str;

    /// Render all pages of `pdf` at `dpi`, calling `on_page` once per page
    /// in page order. Returns the number of pages rendered.
    ///
    /// An error from `on_page` stops rendering and is returned unchanged.
    fn rasterize(
        &self,
        pdf: &Path,
        dpi: u32,
        on_page: &mut dyn FnMut(PageRender) -> Result<()>,
    ) -> Result<usize>;
}

/// Rasterizer used when the crate is built without a rendering engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRasterizer;

impl PageRasterizer for UnavailableRasterizer {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn rasterize(
        &self,
        _pdf: &Path,
        _dpi: u32,
        _on_page: &mut dyn FnMut(PageRender) -> Result<()>,
    ) -> Result<usize> {
        Err(Error::RendererUnavailable)
    }
}

/// The rasterizer [`Analyzer::new`](crate::Analyzer::new) uses.
#[cfg(feature = "render")]
pub type DefaultRasterizer = PdfiumRasterizer;

/// The rasterizer [`Analyzer::new`](crate::Analyzer::new) uses.
#[cfg(not(feature = "render"))]
pub type DefaultRasterizer = UnavailableRasterizer;

/// Saves each page a rasterizer produces as `<stem>_page<N>.png`.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    output_dir: PathBuf,
    stem: String,
    dpi: u32,
}

impl PageRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>, dpi: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            stem: stem.into(),
            dpi,
        }
    }

    /// Render and save every page. Pages already written stay on disk when a
    /// later page fails; the error is returned and the caller counts zero.
    pub fn render<R: PageRasterizer + ?Sized>(
        &self,
        rasterizer: &R,
        pdf: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<usize> {
        log::debug!("rendering {} with {} at {} dpi", pdf.display(), rasterizer.name(), self.dpi);

        let mut saved = 0usize;
        let mut save_page = |render: PageRender| -> Result<()> {
            if saved == 0 {
                fs::create_dir_all(&self.output_dir)?;
            }
            let filename = page_render_filename(&self.stem, render.page);
            let path = self.output_dir.join(&filename);
            render.image.save_with_format(&path, ImageFormat::Png)?;
            saved += 1;
            observer.page_rendered(render.page, &filename);
            Ok(())
        };

        rasterizer.rasterize(pdf, self.dpi, &mut save_page)?;
        Ok(saved)
    }
}
