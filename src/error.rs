//! Error types for pdfharvest library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfharvest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while harvesting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input PDF does not exist.
    #[error("PDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// A required PDF object or dictionary key is missing.
    #[error("Missing required object: {0}")]
    MissingObject(String),

    /// Error reconstructing an embedded image from its stream.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// The image uses a color space that cannot be converted to PNG.
    #[error("Unsupported color space: {0}")]
    UnsupportedColorSpace(String),

    /// Error from the raster image library.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error while rendering pages.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Page rendering support was not compiled in.
    #[error("Page rendering is not available in this build")]
    RendererUnavailable,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid analysis option.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
