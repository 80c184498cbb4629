//! Core library for reservation document processing.
//!
//! This crate provides:
//! - Document-to-text conversion (PDF text, embedded-image OCR, images, CSV, plain text)
//! - OCR pipeline using PaddleOCR models
//! - Reservation field extraction (resort, dates, cost, reservation number, email)
//! - Validity classification of the extracted record

pub mod error;
pub mod models;
pub mod document;
pub mod ocr;
pub mod reservation;

pub use error::{ResxError, Result};
pub use models::reservation::{ExtractedFields, ValidityVerdict};
pub use document::{DocumentKind, DocumentReader, DocumentText};
pub use ocr::{ModelStatus, OcrEngine, OcrResult, TextBox};
pub use reservation::{
    ExtractionResult, PatternLibrary, ReservationExtractor, ReservationParser, ValidityClassifier,
};
