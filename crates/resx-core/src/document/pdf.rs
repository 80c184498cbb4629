//! PDF text and embedded image extraction using lopdf and pdf-extract.

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, trace};

use crate::error::DocumentError;

/// A loaded PDF document.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfDocument {
    /// Parse a PDF from bytes, decrypting it if it uses an empty password.
    pub fn load(data: &[u8]) -> Result<Self, DocumentError> {
        let mut document =
            Document::load_mem(data).map_err(|e| DocumentError::PdfParse(e.to_string()))?;

        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| DocumentError::PdfParse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);

        Ok(Self { document, raw_data })
    }

    /// Text layer of the whole document.
    pub fn text(&self) -> Result<String, DocumentError> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| DocumentError::PdfText(e.to_string()))
    }

    /// Decodable images of every page, in page order.
    pub fn images(&self) -> Vec<DynamicImage> {
        self.document
            .get_pages()
            .into_iter()
            .flat_map(|(number, page_id)| {
                let images = self.page_xobjects(page_id, |stream| self.decode_image(stream));
                trace!("Page {}: {} decodable images", number, images.len());
                images
            })
            .collect()
    }

    /// Number of image XObjects across all pages, without decoding them.
    pub fn image_count(&self) -> usize {
        self.document
            .get_pages()
            .into_values()
            .map(|page_id| {
                self.page_xobjects(page_id, |stream| is_image(&stream.dict).then_some(()))
                    .len()
            })
            .sum()
    }

    /// Apply `f` to each XObject stream of a page, keeping the `Some` results.
    fn page_xobjects<T>(&self, page_id: ObjectId, mut f: impl FnMut(&Stream) -> Option<T>) -> Vec<T> {
        let Some(resources) = self.page_resources(page_id) else {
            return Vec::new();
        };

        let Ok(xobjects) = resources.get(b"XObject") else {
            return Vec::new();
        };

        let Ok((_, Object::Dictionary(xobjects))) = self.document.dereference(xobjects) else {
            return Vec::new();
        };

        xobjects
            .iter()
            .filter_map(|(_, reference)| match self.document.dereference(reference) {
                Ok((_, Object::Stream(stream))) => f(stream),
                _ => None,
            })
            .collect()
    }

    /// Resources dictionary of a page, following `Parent` links for inherited resources.
    fn page_resources(&self, page_id: ObjectId) -> Option<Dictionary> {
        let mut node_id = page_id;

        loop {
            let Ok(Object::Dictionary(node)) = self.document.get_object(node_id) else {
                return None;
            };

            if let Ok(resources) = node.get(b"Resources") {
                if let Ok((_, Object::Dictionary(resources))) = self.document.dereference(resources) {
                    return Some(resources.clone());
                }
            }

            match node.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => node_id = *parent_id,
                _ => return None,
            }
        }
    }

    fn decode_image(&self, stream: &Stream) -> Option<DynamicImage> {
        let dict = &stream.dict;

        if !is_image(dict) {
            return None;
        }

        let width = dimension(dict, b"Width")?;
        let height = dimension(dict, b"Height")?;

        let filter = dict.get(b"Filter").ok().and_then(|filter| match filter {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(filters) => filters.first().and_then(|o| o.as_name().ok()),
            _ => None,
        });

        match filter {
            Some(b"DCTDecode") => {
                trace!("Decoding {}x{} JPEG image", width, height);
                return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                    .ok();
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                trace!("Skipping {}x{} image with unsupported filter", width, height);
                return None;
            }
            _ => {}
        }

        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| match o {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                Object::Reference(r) => self.document.get_object(*r).ok().and_then(|o| o.as_name().ok()),
                _ => None,
            })
            .unwrap_or(b"DeviceRGB");

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8);

        raw_to_image(data, width, height, color_space, bits)
    }
}

fn is_image(dict: &Dictionary) -> bool {
    dict.get(b"Subtype")
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Image")
}

/// A positive image dimension that fits in `u32`.
fn dimension(dict: &Dictionary, key: &[u8]) -> Option<u32> {
    let value = dict.get(key).ok()?.as_i64().ok()?;
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Build an image from uncompressed 8-bit RGB or grayscale samples.
fn raw_to_image(
    mut data: Vec<u8>,
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: i64,
) -> Option<DynamicImage> {
    if bits_per_component != 8 {
        trace!("Unsupported bits per component: {}", bits_per_component);
        return None;
    }

    let pixels = (width as usize).checked_mul(height as usize)?;

    match color_space {
        b"DeviceRGB" | b"RGB" => {
            let len = pixels.checked_mul(3).filter(|len| data.len() >= *len)?;
            data.truncate(len);
            RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
        }
        b"DeviceGray" | b"G" if data.len() >= pixels => {
            data.truncate(pixels);
            GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
        }
        _ => {
            trace!(
                "Could not decode image: colorspace={:?}, data_len={}",
                String::from_utf8_lossy(color_space),
                data.len()
            );
            None
        }
    }
}
