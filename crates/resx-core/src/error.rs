//! Error types for the resx-core library.
//!
//! Field extraction itself never fails; these errors belong to the
//! document-to-text side of the pipeline (reading, sniffing, PDF, CSV, OCR).

use thiserror::Error;

/// Main error type for the resx library.
#[derive(Error, Debug)]
pub enum ResxError {
    /// Document reading or conversion error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to turning an input file into text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file kind could not be handled.
    #[error("unsupported or unknown MIME type: {0}")]
    Unsupported(String),

    /// The file exceeds the configured size limit.
    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    PdfParse(String),

    /// Failed to extract text from the PDF.
    #[error("failed to extract PDF text: {0}")]
    PdfText(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to read CSV content.
    #[error("error reading CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Plain text file is not valid UTF-8.
    #[error("text is not valid UTF-8")]
    Encoding,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// OCR support was not compiled in.
    #[error("OCR support is not available in this build")]
    Unavailable,

    /// An image needs OCR but no engine was supplied.
    #[error("no OCR engine configured")]
    NotConfigured,

    /// One or more model files are missing.
    #[error("OCR model not found: {0}")]
    ModelMissing(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Result type for the resx library.
pub type Result<T> = std::result::Result<T, ResxError>;
