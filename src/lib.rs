//! # pdfharvest
//!
//! Pull everything useful out of a PDF in one pass: embedded images, page
//! renders and per-page text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfharvest::{AnalyzeOptions, Analyzer, SilentObserver};
//! use std::path::Path;
//!
//! fn main() -> pdfharvest::Result<()> {
//!     let options = AnalyzeOptions::new().with_output_dir("references/extracted");
//!     let analysis = Analyzer::new(options).analyze(Path::new("report.pdf"), &mut SilentObserver)?;
//!
//!     println!("{} embedded images", analysis.summary.embedded_images);
//!     println!("{} pages rendered", analysis.summary.pages_converted);
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! For `report.pdf` and output directory `out`:
//!
//! ```text
//! out/report/images/report_page<N>_img<K>.png
//! out/report/pages/report_page<N>.png
//! out/report/text/report_text.json
//! out/report/summary.json
//! ```
//!
//! ## Features
//!
//! - `render` (default): page rendering through PDFium. The PDFium shared
//!   library must be installed at runtime, see [`raster::INSTALL_HINT`].

pub mod analyze;
pub mod deps;
pub mod detect;
pub mod error;
pub mod extract;
pub mod json;
pub mod layout;
pub mod model;
pub mod options;
pub mod progress;
pub mod raster;

pub use analyze::{analyze_pdf, Analysis, Analyzer};
pub use deps::{check_dependencies, required_dependencies, Dependency, DependencyReport};
pub use detect::{detect_format_from_bytes, detect_format_from_path, PdfHeader};
pub use error::{Error, Result};
pub use layout::OutputLayout;
pub use model::{
    ExtractedImage, FailedImage, ImageExtraction, ImageOutcome, OutputDirectories, PageText,
    PixelMode, RunSummary, TextDocument,
};
pub use options::{AnalyzeOptions, DEFAULT_DPI, DEFAULT_OUTPUT_DIR};
pub use progress::{ProgressObserver, SilentObserver, Stage};
pub use raster::{DefaultRasterizer, PageRasterizer, PageRender, UnavailableRasterizer};

#[cfg(feature = "render")]
pub use raster::PdfiumRasterizer;
