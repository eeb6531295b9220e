//! lopdf-backed extraction stages: embedded images and page text.

pub mod decode;
mod images;
mod source;
mod text;

pub use decode::{decode_image, ColorSpace, DecodedImage};
pub use images::ImageExtractor;
pub use source::{ImageXObject, PdfSource};
pub use text::extract_text;
