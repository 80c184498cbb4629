//! OCR pipeline using PaddleOCR models.

mod engine;

pub use engine::OcrEngine;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::config::OcrConfig;

/// A recognised text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Build a result from unordered boxes, sorting them into reading order.
    pub fn from_boxes(mut boxes: Vec<TextBox>, image_size: (u32, u32), processing_time_ms: u64) -> Self {
        sort_by_reading_order(&mut boxes);

        let text = boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            boxes,
            text,
            processing_time_ms,
            image_size,
        }
    }
}

/// Sort boxes top-to-bottom in 20px rows, then left-to-right within a row.
fn sort_by_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Presence of the OCR model files in a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    /// Directory that was checked.
    pub model_dir: PathBuf,
    /// Each expected file with its size, or `None` when missing.
    pub files: Vec<(String, Option<u64>)>,
}

impl ModelStatus {
    /// Check which of the configured model files exist in `model_dir`.
    pub fn check(model_dir: &Path, config: &OcrConfig) -> Self {
        let files = [
            &config.detection_model,
            &config.recognition_model,
            &config.dictionary,
        ]
        .into_iter()
        .map(|name| {
            let size = std::fs::metadata(model_dir.join(name)).ok().map(|m| m.len());
            (name.clone(), size)
        })
        .collect();

        Self {
            model_dir: model_dir.to_path_buf(),
            files,
        }
    }

    /// True when every model file is present.
    pub fn is_ready(&self) -> bool {
        self.files.iter().all(|(_, size)| size.is_some())
    }

    /// Names of the missing files.
    pub fn missing(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|(_, size)| size.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
