//! Reconstruct raster images from PDF image XObject streams.
//!
//! Sample layout is taken from the stream dictionary: `Width`, `Height`,
//! `BitsPerComponent`, `ColorSpace`, `ImageMask` and `Filter`.
//!
//! Supported:
//! - DCT (JPEG) streams, decoded by the `image` crate
//! - DeviceGray / CalGray / 1-component ICCBased, and stencil masks
//! - DeviceRGB / CalRGB / 3-component ICCBased
//! - DeviceCMYK / 4-component ICCBased, converted to RGB
//! - Indexed over any of the above, expanded through the lookup table
//!
//! JPEG 2000, Separation, DeviceN, Lab and Pattern images are rejected with
//! an error so the caller can count them as failures.

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Object, Stream};

use super::source::PdfSource;
use crate::error::{Error, Result};
use crate::model::PixelMode;

/// A decoded image and how its samples were interpreted.
#[derive(Debug)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub mode: PixelMode,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Color space of an image XObject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpace {
    Gray,
    Rgb,
    Cmyk,
    Indexed {
        base: Box<ColorSpace>,
        hival: u8,
        lookup: Vec<u8>,
    },
}

impl ColorSpace {
    /// Number of color components per sample.
    pub fn components(&self) -> usize {
        match self {
            ColorSpace::Gray | ColorSpace::Indexed { .. } => 1,
            ColorSpace::Rgb => 3,
            ColorSpace::Cmyk => 4,
        }
    }

    fn pixel_mode(&self) -> PixelMode {
        match self {
            ColorSpace::Gray => PixelMode::Gray,
            ColorSpace::Rgb => PixelMode::Rgb,
            ColorSpace::Cmyk => PixelMode::Cmyk,
            ColorSpace::Indexed { .. } => PixelMode::Indexed,
        }
    }
}

/// Parse a `ColorSpace` entry (name or array form).
pub fn parse_color_space(source: &PdfSource, obj: &Object) -> Result<ColorSpace> {
    match source.resolve(obj)? {
        Object::Name(name) => color_space_from_name(name),
        Object::Array(arr) => {
            let family = arr
                .first()
                .and_then(|o| o.as_name().ok())
                .ok_or_else(|| Error::ImageDecode("empty color space array".to_string()))?;

            match family {
                b"ICCBased" => {
                    let profile = arr
                        .get(1)
                        .ok_or_else(|| Error::ImageDecode("ICCBased without profile".to_string()))
                        .and_then(|o| source.resolve(o))?
                        .as_stream()?;
                    icc_color_space(source, &profile.dict)
                }
                b"CalRGB" => Ok(ColorSpace::Rgb),
                b"CalGray" => Ok(ColorSpace::Gray),
                b"Indexed" | b"I" => parse_indexed(source, arr),
                b"DeviceGray" | b"DeviceRGB" | b"DeviceCMYK" => color_space_from_name(family),
                other => Err(Error::UnsupportedColorSpace(
                    String::from_utf8_lossy(other).into_owned(),
                )),
            }
        }
        other => Err(Error::ImageDecode(format!(
            "malformed color space: {:?}",
            other
        ))),
    }
}

fn color_space_from_name(name: &[u8]) -> Result<ColorSpace> {
    match name {
        b"DeviceGray" | b"G" | b"CalGray" => Ok(ColorSpace::Gray),
        b"DeviceRGB" | b"RGB" | b"CalRGB" => Ok(ColorSpace::Rgb),
        b"DeviceCMYK" | b"CMYK" => Ok(ColorSpace::Cmyk),
        other => Err(Error::UnsupportedColorSpace(
            String::from_utf8_lossy(other).into_owned(),
        )),
    }
}

fn icc_color_space(source: &PdfSource, profile: &Dictionary) -> Result<ColorSpace> {
    let components = profile.get(b"N").and_then(Object::as_i64).ok();
    match components {
        Some(1) => Ok(ColorSpace::Gray),
        Some(3) => Ok(ColorSpace::Rgb),
        Some(4) => Ok(ColorSpace::Cmyk),
        _ => match profile.get(b"Alternate") {
            Ok(alternate) => parse_color_space(source, alternate),
            Err(_) => Err(Error::UnsupportedColorSpace(format!(
                "ICCBased with {:?} components",
                components
            ))),
        },
    }
}

fn parse_indexed(source: &PdfSource, arr: &[Object]) -> Result<ColorSpace> {
    if arr.len() < 4 {
        return Err(Error::ImageDecode("Indexed color space needs 4 entries".to_string()));
    }

    let base = parse_color_space(source, &arr[1])?;
    if matches!(base, ColorSpace::Indexed { .. }) {
        return Err(Error::ImageDecode("nested Indexed color space".to_string()));
    }

    let hival = source.resolve(&arr[2])?.as_i64()?;
    let hival = u8::try_from(hival)
        .map_err(|_| Error::ImageDecode(format!("Indexed hival {} out of range", hival)))?;

    let lookup = match source.resolve(&arr[3])? {
        Object::String(bytes, _) => bytes.clone(),
        Object::Stream(stream) => stream_data(stream)?,
        other => {
            return Err(Error::ImageDecode(format!(
                "malformed Indexed lookup: {:?}",
                other
            )))
        }
    };

    let needed = (hival as usize + 1) * base.components();
    if lookup.len() < needed {
        return Err(Error::ImageDecode(format!(
            "Indexed lookup has {} bytes, expected {}",
            lookup.len(),
            needed
        )));
    }

    Ok(ColorSpace::Indexed {
        base: Box::new(base),
        hival,
        lookup,
    })
}

/// Names in the `Filter` entry, in application order.
fn filter_names(dict: &Dictionary) -> Vec<Vec<u8>> {
    match dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![name.clone()],
        Ok(Object::Array(arr)) => arr
            .iter()
            .filter_map(|o| o.as_name().ok().map(<[u8]>::to_vec))
            .collect(),
        _ => Vec::new(),
    }
}

/// Stream bytes with all filters removed.
fn stream_data(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_err() {
        return Ok(stream.content.clone());
    }
    stream
        .decompressed_content()
        .map_err(|e| Error::ImageDecode(format!("cannot decompress stream: {}", e)))
}

fn dimension(dict: &Dictionary, key: &[u8]) -> Result<u32> {
    let name = String::from_utf8_lossy(key).into_owned();
    let value = dict
        .get(key)
        .and_then(Object::as_i64)
        .map_err(|_| Error::MissingObject(name.clone()))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| Error::ImageDecode(format!("invalid {}: {}", name, value)))
}

/// Decode an image XObject stream into a raster image.
pub fn decode_image(source: &PdfSource, stream: &Stream) -> Result<DecodedImage> {
    let dict = &stream.dict;
    let width = dimension(dict, b"Width")?;
    let height = dimension(dict, b"Height")?;

    let filters = filter_names(dict);
    if filters.iter().any(|f| f == b"JPXDecode") {
        return Err(Error::ImageDecode(
            "JPEG 2000 (JPXDecode) streams are not supported".to_string(),
        ));
    }
    if filters.last().is_some_and(|f| f == b"DCTDecode" || f == b"DCT") {
        return decode_jpeg(stream, &filters);
    }

    let is_mask = dict
        .get(b"ImageMask")
        .and_then(Object::as_bool)
        .unwrap_or(false);
    let bits = dict
        .get(b"BitsPerComponent")
        .and_then(Object::as_i64)
        .unwrap_or(if is_mask { 1 } else { 8 });
    let bits = u8::try_from(bits)
        .ok()
        .filter(|b| matches!(b, 1 | 2 | 4 | 8 | 16))
        .ok_or_else(|| Error::ImageDecode(format!("invalid BitsPerComponent: {}", bits)))?;

    let color_space = if is_mask {
        ColorSpace::Gray
    } else {
        let cs = dict
            .get(b"ColorSpace")
            .map_err(|_| Error::MissingObject("ColorSpace".to_string()))?;
        parse_color_space(source, cs)?
    };

    let data = stream_data(stream)?;
    let image = samples_to_image(&data, width, height, bits, &color_space)?;

    Ok(DecodedImage {
        image,
        mode: color_space.pixel_mode(),
    })
}

fn decode_jpeg(stream: &Stream, filters: &[Vec<u8>]) -> Result<DecodedImage> {
    // Only a bare DCT stream can be handed to the JPEG decoder as-is.
    if filters.len() > 1 {
        return Err(Error::ImageDecode(
            "filter chains ending in DCTDecode are not supported".to_string(),
        ));
    }
    let image = image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg)?;
    Ok(DecodedImage {
        image,
        mode: PixelMode::Jpeg,
    })
}

/// Convert unfiltered sample data to an 8-bit image.
pub fn samples_to_image(
    data: &[u8],
    width: u32,
    height: u32,
    bits: u8,
    color_space: &ColorSpace,
) -> Result<DynamicImage> {
    let components = color_space.components();
    let samples = unpack_samples(data, width, height, bits, components)?;

    match color_space {
        ColorSpace::Gray => {
            let gray = scale_to_u8(samples, bits);
            GrayImage::from_raw(width, height, gray)
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(|| Error::ImageDecode("gray buffer size mismatch".to_string()))
        }
        ColorSpace::Rgb => {
            let rgb = scale_to_u8(samples, bits);
            RgbImage::from_raw(width, height, rgb)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| Error::ImageDecode("RGB buffer size mismatch".to_string()))
        }
        ColorSpace::Cmyk => {
            let cmyk = scale_to_u8(samples, bits);
            RgbImage::from_raw(width, height, cmyk_to_rgb(&cmyk))
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| Error::ImageDecode("CMYK buffer size mismatch".to_string()))
        }
        ColorSpace::Indexed {
            base,
            hival,
            lookup,
        } => expand_palette(&samples, width, height, base, *hival, lookup),
    }
}

fn expand_palette(
    indices: &[u8],
    width: u32,
    height: u32,
    base: &ColorSpace,
    hival: u8,
    lookup: &[u8],
) -> Result<DynamicImage> {
    let n = base.components();
    let mut colors = Vec::with_capacity(indices.len() * n);
    for &index in indices {
        let i = index.min(hival) as usize * n;
        colors.extend_from_slice(&lookup[i..i + n]);
    }

    let image = match base {
        ColorSpace::Gray => GrayImage::from_raw(width, height, colors).map(DynamicImage::ImageLuma8),
        ColorSpace::Rgb => RgbImage::from_raw(width, height, colors).map(DynamicImage::ImageRgb8),
        ColorSpace::Cmyk => {
            RgbImage::from_raw(width, height, cmyk_to_rgb(&colors)).map(DynamicImage::ImageRgb8)
        }
        ColorSpace::Indexed { .. } => {
            return Err(Error::ImageDecode("nested Indexed color space".to_string()))
        }
    };
    image.ok_or_else(|| Error::ImageDecode("palette buffer size mismatch".to_string()))
}

/// Split packed rows into one value per sample. 16-bit samples keep
/// their high byte. Rows are padded to whole bytes.
fn unpack_samples(
    data: &[u8],
    width: u32,
    height: u32,
    bits: u8,
    components: usize,
) -> Result<Vec<u8>> {
    let too_large =
        || Error::ImageDecode(format!("image dimensions {}x{} are too large", width, height));
    let samples_per_row = (width as usize)
        .checked_mul(components)
        .ok_or_else(too_large)?;
    let row_bytes = samples_per_row
        .checked_mul(bits as usize)
        .ok_or_else(too_large)?
        .div_ceil(8);
    let expected = row_bytes
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;

    if data.len() < expected {
        return Err(Error::ImageDecode(format!(
            "image data has {} bytes, expected {} ({}x{}, {} bpc, {} components)",
            data.len(),
            expected,
            width,
            height,
            bits,
            components
        )));
    }

    let mut samples = Vec::with_capacity(samples_per_row * height as usize);
    for row in data[..expected].chunks_exact(row_bytes) {
        match bits {
            8 => samples.extend_from_slice(&row[..samples_per_row]),
            16 => samples.extend(row.chunks_exact(2).map(|pair| pair[0])),
            _ => {
                let mask = (1u16 << bits) - 1;
                for s in 0..samples_per_row {
                    let bit = s * bits as usize;
                    let byte = row[bit / 8] as u16;
                    let shift = 8 - bits as usize - (bit % 8);
                    samples.push(((byte >> shift) & mask) as u8);
                }
            }
        }
    }

    Ok(samples)
}

/// Stretch sub-byte samples to the full 0..=255 range.
fn scale_to_u8(mut samples: Vec<u8>, bits: u8) -> Vec<u8> {
    if bits < 8 {
        let max = (1u16 << bits) - 1;
        for s in samples.iter_mut() {
            *s = (*s as u16 * 255 / max) as u8;
        }
    }
    samples
}

fn cmyk_to_rgb(cmyk: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(cmyk.len() / 4 * 3);
    for px in cmyk.chunks_exact(4) {
        let k = 255 - px[3] as u16;
        rgb.push(((255 - px[0] as u16) * k / 255) as u8);
        rgb.push(((255 - px[1] as u16) * k / 255) as u8);
        rgb.push(((255 - px[2] as u16) * k / 255) as u8);
    }
    rgb
}
