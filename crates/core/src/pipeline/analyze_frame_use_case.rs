use ndarray::Array4;

use crate::classification::domain::emotion::Emotion;
use crate::classification::domain::emotion_classifier::EmotionClassifier;
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::error::AnalysisError;
use crate::shared::analysis::FacePrediction;
use crate::shared::frame::Frame;
use crate::shared::luma::LumaFrame;

/// Single-frame inference pipeline: luma → detect → crop → classify.
///
/// For each detected region the luma crop is resized to the classifier's
/// input size, normalized to `[-1, 1]`, given batch and channel
/// dimensions and classified; the highest-probability label wins.
/// Regions whose (offset-expanded) crop is empty are skipped silently.
pub struct AnalyzeFrameUseCase {
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn EmotionClassifier>,
    offsets: (i32, i32),
}

impl AnalyzeFrameUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn EmotionClassifier>,
        offsets: (i32, i32),
    ) -> Self {
        Self {
            detector,
            classifier,
            offsets,
        }
    }

    /// Analyzes one frame, returning predictions in detection order.
    pub fn execute(&mut self, frame: &Frame) -> Result<Vec<FacePrediction>, AnalysisError> {
        let luma = LumaFrame::from_frame(frame);
        let regions = self
            .detector
            .detect(&luma)
            .map_err(|e| AnalysisError::Detection(e.to_string()))?;

        let (height, width) = self.classifier.input_size();
        let mut faces = Vec::with_capacity(regions.len());

        for region in regions {
            let (x1, x2, y1, y2) = region.expand(self.offsets);
            let Some(crop) = luma.crop(x1, x2, y1, y2) else {
                continue;
            };

            let input = normalize(&crop.resize(width as u32, height as u32));
            let probabilities = self
                .classifier
                .predict(input)
                .map_err(|e| AnalysisError::Classification(e.to_string()))?;

            let Some((index, score)) = argmax(&probabilities) else {
                continue;
            };
            let emotion = Emotion::from_index(index).ok_or_else(|| {
                AnalysisError::Classification(format!("label index {index} out of range"))
            })?;

            faces.push(FacePrediction {
                region,
                emotion,
                score,
            });
        }

        Ok(faces)
    }
}

/// Scales luma bytes to `[-1, 1]` and adds batch and channel dimensions:
/// `(h, w)` bytes become a `(1, h, w, 1)` float tensor.
fn normalize(crop: &LumaFrame) -> Array4<f32> {
    let h = crop.height() as usize;
    let w = crop.width() as usize;
    let mut tensor = Array4::<f32>::zeros((1, h, w, 1));
    for y in 0..h {
        for x in 0..w {
            let v = crop.data()[y * w + x] as f32 / 255.0;
            tensor[[0, y, x, 0]] = (v - 0.5) * 2.0;
        }
    }
    tensor
}

/// Index and value of the largest probability; the first maximum wins on
/// ties. `None` for an empty vector.
fn argmax(probabilities: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((i, p)),
        }
    }
    best
}
