use crate::classification::domain::emotion::Emotion;
use crate::shared::region::Region;

/// One classified face: where it is and what it appears to feel.
#[derive(Clone, Debug, PartialEq)]
pub struct FacePrediction {
    pub region: Region,
    pub emotion: Emotion,
    /// Probability the classifier assigned to `emotion`, in `[0, 1]`.
    pub score: f32,
}

/// All face predictions for one frame, in detection order.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAnalysis {
    pub frame_index: usize,
    pub faces: Vec<FacePrediction>,
}
