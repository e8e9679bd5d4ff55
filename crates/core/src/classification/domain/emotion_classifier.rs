use ndarray::Array4;

/// Domain interface for emotion classification.
///
/// Consumes a normalized single-channel crop with batch and channel
/// dimensions already added (`(1, height, width, 1)`, values in
/// `[-1, 1]`) and returns the probability vector over
/// [`Emotion::ALL`](crate::classification::domain::emotion::Emotion::ALL),
/// index-aligned.
pub trait EmotionClassifier: Send {
    /// Expected spatial input size as `(height, width)`.
    fn input_size(&self) -> (usize, usize);

    fn predict(&mut self, input: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>>;
}
