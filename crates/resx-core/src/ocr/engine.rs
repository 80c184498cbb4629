//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
#[cfg(feature = "ocr")]
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::debug;
#[cfg(feature = "ocr")]
use tracing::info;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{ModelStatus, OcrResult};
#[cfg(feature = "ocr")]
use super::TextBox;

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct OcrEngine {
    #[cfg(feature = "ocr")]
    engine: pure_onnx_ocr::engine::OcrEngine,
    #[cfg(feature = "ocr")]
    keep_unk: bool,
}

impl OcrEngine {
    /// Create an engine from the model files named in `config`, found in `model_dir`.
    pub fn from_dir(model_dir: &Path, config: OcrConfig) -> Result<Self, OcrError> {
        let status = ModelStatus::check(model_dir, &config);
        if !status.is_ready() {
            return Err(OcrError::ModelMissing(format!(
                "{} in {}",
                status.missing().join(", "),
                model_dir.display()
            )));
        }

        Self::load(model_dir, config)
    }

    #[cfg(feature = "ocr")]
    fn load(model_dir: &Path, config: OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&config.detection_model);
        let rec_path = model_dir.join(&config.recognition_model);
        let dict_path = model_dir.join(&config.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            keep_unk: config.keep_unk,
        })
    }

    #[cfg(not(feature = "ocr"))]
    fn load(_model_dir: &Path, _config: OcrConfig) -> Result<Self, OcrError> {
        Err(OcrError::Unavailable)
    }

    /// Process an image and extract text with bounding boxes.
    #[cfg(feature = "ocr")]
    pub fn process(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        debug!("Running OCR on {}x{} image", width, height);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
                confidence: r.confidence,
            })
            .collect();

        let result = OcrResult::from_boxes(
            boxes,
            (width, height),
            start.elapsed().as_millis() as u64,
        );

        info!(
            "OCR complete: {} text boxes in {}ms",
            result.boxes.len(),
            result.processing_time_ms
        );

        Ok(result)
    }

    #[cfg(not(feature = "ocr"))]
    pub fn process(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let (width, height) = image.dimensions();
        debug!("OCR requested for {}x{} image without OCR support", width, height);
        Err(OcrError::Unavailable)
    }

    /// Convenience: extract text only.
    pub fn extract_text(&self, image: &DynamicImage) -> Result<String, OcrError> {
        Ok(self.process(image)?.text)
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
#[cfg(feature = "ocr")]
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
