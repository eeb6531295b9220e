//! PDFium-backed rasterizer.

use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;

use super::{PageRasterizer, PageRender, PDF_POINTS_PER_INCH};
use crate::error::{Error, Result};

/// Renders pages through the PDFium shared library.
///
/// The library is looked up next to the working directory first, then in
/// the system library path. It is bound per call, so a missing library only
/// fails the render stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    fn bind(&self) -> Result<Pdfium> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::Render(format!("cannot load PDFium: {}", e)))?;

        Ok(Pdfium::new(bindings))
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn name(&self) -> &str {
        "pdfium"
    }

    fn rasterize(
        &self,
        pdf: &Path,
        dpi: u32,
        on_page: &mut dyn FnMut(PageRender) -> Result<()>,
    ) -> Result<usize> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_file(pdf, None)
            .map_err(|e| Error::Render(format!("cannot open {}: {}", pdf.display(), e)))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / PDF_POINTS_PER_INCH);

        let mut rendered = 0usize;
        for (index, page) in document.pages().iter().enumerate() {
            let page_num = index as u32 + 1;
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| Error::Render(format!("page {}: {}", page_num, e)))?;
            let image = DynamicImage::ImageRgb8(bitmap.as_image().into_rgb8());

            on_page(PageRender {
                page: page_num,
                image,
            })?;
            rendered += 1;
        }

        Ok(rendered)
    }
}
