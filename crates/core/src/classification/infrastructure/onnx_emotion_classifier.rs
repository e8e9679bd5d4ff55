use std::path::Path;

use ndarray::Array4;

use crate::classification::domain::emotion::Emotion;
use crate::classification::domain::emotion_classifier::EmotionClassifier;

/// mini-XCEPTION input resolution (square).
const INPUT_SIZE: usize = 64;

/// Emotion classifier backed by an ONNX Runtime session over the
/// mini-XCEPTION FER-2013 export.
///
/// The network ends in softmax, so the output row is consumed directly
/// as the probability vector without re-normalization.
pub struct OnnxEmotionClassifier {
    session: ort::session::Session,
}

impl OnnxEmotionClassifier {
    /// Load the emotion model from `model_path`.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        Ok(Self { session })
    }
}

impl EmotionClassifier for OnnxEmotionClassifier {
    fn input_size(&self) -> (usize, usize) {
        (INPUT_SIZE, INPUT_SIZE)
    }

    fn predict(&mut self, input: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(input)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() != 1 {
            return Err(format!("Emotion model expected 1 output, got {}", outputs.len()).into());
        }

        let probabilities = outputs[0].try_extract_array::<f32>()?;
        let data = probabilities
            .as_slice()
            .ok_or("Cannot get probability slice")?;
        if data.len() != Emotion::ALL.len() {
            return Err(format!(
                "Emotion model expected {} probabilities, got {}",
                Emotion::ALL.len(),
                data.len()
            )
            .into());
        }

        Ok(data.to_vec())
    }
}
