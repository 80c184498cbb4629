//! Document-to-text conversion.
//!
//! Turns an input file (PDF, image, CSV, or plain text) into a single UTF-8
//! text blob for the reservation parser. The file kind is decided from magic
//! bytes; UTF-8 content is CSV when the extension says so and plain text
//! otherwise.

mod pdf;
mod tabular;

pub use pdf::PdfDocument;
pub use tabular::csv_to_text;

use std::fs;
use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{DocumentError, OcrError, Result};
use crate::models::config::DocumentConfig;
use crate::ocr::OcrEngine;

/// Kind of input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF document.
    Pdf,
    /// Raster image; carries its MIME type.
    Image(&'static str),
    /// Comma-separated values.
    Csv,
    /// UTF-8 plain text.
    PlainText,
    /// Anything else.
    Unsupported,
}

impl DocumentKind {
    /// Detect the kind from the file's leading bytes and, for text, its extension.
    pub fn detect(path: &Path, data: &[u8]) -> Self {
        let image_mime = match data {
            [0x25, 0x50, 0x44, 0x46, ..] => return DocumentKind::Pdf,
            [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
            [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
            [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
            [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => Some("image/tiff"),
            [b'B', b'M', ..] => Some("image/bmp"),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
            _ => None,
        };

        if let Some(mime) = image_mime {
            return DocumentKind::Image(mime);
        }

        if std::str::from_utf8(data).is_err() {
            return DocumentKind::Unsupported;
        }

        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        if is_csv {
            DocumentKind::Csv
        } else {
            DocumentKind::PlainText
        }
    }

    /// MIME type for display.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Image(mime) => *mime,
            DocumentKind::Csv => "text/csv",
            DocumentKind::PlainText => "text/plain",
            DocumentKind::Unsupported => "application/octet-stream",
        }
    }
}

/// Text produced from one input document.
#[derive(Debug, Clone)]
pub struct DocumentText {
    /// Detected kind.
    pub kind: DocumentKind,
    /// Extracted text.
    pub text: String,
    /// Number of images whose OCR text was included.
    pub ocr_images: usize,
}

impl DocumentText {
    /// Leading characters of the text.
    pub fn preview(&self, chars: usize) -> &str {
        match self.text.char_indices().nth(chars) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

/// Reads input files into text.
pub struct DocumentReader {
    config: DocumentConfig,
    ocr: Option<OcrEngine>,
}

impl DocumentReader {
    /// Create a reader without OCR; images fail and PDF images are skipped.
    pub fn new(config: DocumentConfig) -> Self {
        Self { config, ocr: None }
    }

    /// Attach an OCR engine.
    pub fn with_ocr(mut self, engine: OcrEngine) -> Self {
        self.ocr = Some(engine);
        self
    }

    /// Read a file from disk and convert it to text.
    pub fn read_path(&self, path: &Path) -> Result<DocumentText> {
        let size = fs::metadata(path)?.len();
        if size > self.config.max_file_size_bytes {
            return Err(DocumentError::TooLarge {
                size,
                limit: self.config.max_file_size_bytes,
            }
            .into());
        }

        let data = fs::read(path)?;
        let kind = DocumentKind::detect(path, &data);

        info!("Reading {} as {}", path.display(), kind.mime_type());

        self.read_bytes(kind, &data)
    }

    /// Convert already-loaded bytes of a known kind to text.
    pub fn read_bytes(&self, kind: DocumentKind, data: &[u8]) -> Result<DocumentText> {
        let (text, ocr_images) = match kind {
            DocumentKind::Pdf => self.pdf_text(data)?,
            DocumentKind::Image(_) => {
                let engine = self.ocr.as_ref().ok_or(OcrError::NotConfigured)?;
                let image = image::load_from_memory(data)?;
                let mut text = ocr_image(engine, &image)?;
                text.push('\n');
                (text, 1)
            }
            DocumentKind::Csv => (csv_to_text(data)?, 0),
            DocumentKind::PlainText => {
                let text = String::from_utf8(data.to_vec()).map_err(|_| DocumentError::Encoding)?;
                (text, 0)
            }
            DocumentKind::Unsupported => {
                return Err(DocumentError::Unsupported(kind.mime_type().to_string()).into());
            }
        };

        debug!("Extracted {} characters of text", text.chars().count());

        Ok(DocumentText {
            kind,
            text,
            ocr_images,
        })
    }

    /// Page text followed, after a blank line, by OCR text of embedded images.
    fn pdf_text(&self, data: &[u8]) -> Result<(String, usize)> {
        let pdf = PdfDocument::load(data)?;
        let mut text = pdf.text()?;
        text.push('\n');

        if !self.config.ocr_pdf_images {
            debug!("OCR of PDF images disabled");
            return Ok((text, 0));
        }

        let Some(engine) = self.ocr.as_ref() else {
            let skipped = pdf.image_count();
            if skipped > 0 {
                warn!("Skipping {} embedded PDF images: no OCR engine", skipped);
            }
            return Ok((text, 0));
        };

        let images = pdf.images();
        if images.is_empty() {
            return Ok((text, 0));
        }

        debug!("Running OCR on {} embedded PDF images", images.len());

        let mut ocr_text = String::new();
        let mut ocr_count = 0;
        for (i, image) in images.iter().enumerate() {
            match ocr_image(engine, image) {
                Ok(image_text) => {
                    ocr_text.push_str(&image_text);
                    ocr_text.push('\n');
                    ocr_count += 1;
                }
                Err(e) => warn!("OCR failed for image {}: {}", i + 1, e),
            }
        }

        if !ocr_text.trim().is_empty() {
            text.push('\n');
            text.push_str(&ocr_text);
        }

        Ok((text, ocr_count))
    }
}

/// OCR one image after converting it to RGB.
fn ocr_image(engine: &OcrEngine, image: &DynamicImage) -> std::result::Result<String, OcrError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    engine.extract_text(&rgb)
}
