use crate::shared::luma::LumaFrame;
use crate::shared::region::Region;

/// Domain interface for face detection.
///
/// Consumes a grayscale frame, returns one rectangle per face in the
/// detector's native order. Implementations may be stateful, hence
/// `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &LumaFrame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
