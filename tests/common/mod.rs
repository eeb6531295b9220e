//! PDF fixtures built in memory with lopdf.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use pdfharvest::{PageRasterizer, PageRender, Result};

/// Contents of one fixture page.
#[derive(Default)]
pub struct FixturePage {
    pub text: Option<&'static str>,
    pub images: Vec<Stream>,
}

impl FixturePage {
    pub fn text(text: &'static str) -> Self {
        Self {
            text: Some(text),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: Stream) -> Self {
        self.images.push(image);
        self
    }
}

fn image_stream(width: i64, height: i64, color_space: Object, bits: i64, data: Vec<u8>) -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(width),
            "Height" => Object::Integer(height),
            "ColorSpace" => color_space,
            "BitsPerComponent" => Object::Integer(bits),
        },
        data,
    )
}

/// Solid red RGB image.
pub fn rgb_image(width: i64, height: i64) -> Stream {
    let data = [255u8, 0, 0].repeat((width * height) as usize);
    image_stream(width, height, Object::Name(b"DeviceRGB".to_vec()), 8, data)
}

/// Horizontal gray ramp.
pub fn gray_image(width: i64, height: i64) -> Stream {
    let data = (0..width * height).map(|i| (i % 256) as u8).collect();
    image_stream(width, height, Object::Name(b"DeviceGray".to_vec()), 8, data)
}

/// Pure cyan in CMYK.
pub fn cmyk_image(width: i64, height: i64) -> Stream {
    let data = [255u8, 0, 0, 0].repeat((width * height) as usize);
    image_stream(width, height, Object::Name(b"DeviceCMYK".to_vec()), 8, data)
}

/// Two-color palette image: index 0 is blue, index 1 is green.
pub fn indexed_image() -> Stream {
    let color_space = Object::Array(vec![
        Object::Name(b"Indexed".to_vec()),
        Object::Name(b"DeviceRGB".to_vec()),
        Object::Integer(1),
        Object::String(vec![0, 0, 255, 0, 255, 0], StringFormat::Hexadecimal),
    ]);
    image_stream(2, 1, color_space, 8, vec![0, 1])
}

/// Image in a color space that cannot be converted.
pub fn separation_image() -> Stream {
    let color_space = Object::Array(vec![
        Object::Name(b"Separation".to_vec()),
        Object::Name(b"Spot".to_vec()),
        Object::Name(b"DeviceCMYK".to_vec()),
        Object::Null,
    ]);
    image_stream(2, 2, color_space, 8, vec![0; 4])
}

/// CMYK image whose declared size cannot be addressed.
pub fn oversized_image() -> Stream {
    image_stream(
        4_000_000_000,
        4_000_000_000,
        Object::Name(b"DeviceCMYK".to_vec()),
        16,
        vec![0; 16],
    )
}

/// DCT-encoded image.
pub fn jpeg_image(width: u32, height: u32) -> Stream {
    let pixels = RgbImage::from_pixel(width, height, image::Rgb([40, 120, 200]));
    let mut encoded = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(pixels)
        .write_to(&mut encoded, ImageFormat::Jpeg)
        .unwrap();

    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(width as i64),
            "Height" => Object::Integer(height as i64),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "DCTDecode",
        },
        encoded.into_inner(),
    )
}

/// Build a PDF from fixture pages.
pub fn build_pdf(pages: Vec<FixturePage>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut page_ids = Vec::new();
    for page in pages {
        let mut xobjects = lopdf::Dictionary::new();
        for (i, image) in page.images.into_iter().enumerate() {
            let id = doc.add_object(image);
            xobjects.set(format!("Im{}", i + 1), Object::Reference(id));
        }

        let content = match page.text {
            Some(text) => format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text),
            None => String::new(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                "XObject" => xobjects,
            },
        });
        page_ids.push(page_id);
    }

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
        "Count" => Object::Integer(page_ids.len() as i64),
    });
    for page_id in &page_ids {
        if let Ok(dict) = doc.get_object_mut(*page_id).and_then(Object::as_dict_mut) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Write `bytes` to `<dir>/<name>` and return the path.
pub fn write_pdf(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Rasterizer that produces blank pages, one per page of the document.
pub struct BlankPages;

impl PageRasterizer for BlankPages {
    fn name(&self) -> &str {
        "blank"
    }

    fn rasterize(
        &self,
        pdf: &Path,
        _dpi: u32,
        on_page: &mut dyn FnMut(PageRender) -> Result<()>,
    ) -> Result<usize> {
        let doc = Document::load(pdf)?;
        let count = doc.get_pages().len();
        for page in 1..=count as u32 {
            let image = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
            on_page(PageRender { page, image })?;
        }
        Ok(count)
    }
}
