use std::path::Path;

use rustface::ImageData;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::luma::LumaFrame;
use crate::shared::region::Region;

/// Smallest face the cascade will report, in pixels.
const MIN_FACE_SIZE: u32 = 20;

/// Cascade score threshold; detections below it are discarded.
const SCORE_THRESH: f64 = 2.0;

/// Image pyramid downscaling factor between detection passes.
const PYRAMID_SCALE: f32 = 0.8;

/// Face detector backed by the pretrained SeetaFace funnel cascade.
///
/// The model is loaded from disk and consumed as a black box: luma
/// pixels in, candidate rectangles out. Rectangles are clamped to the
/// frame bounds before they reach the pipeline.
pub struct SeetaFaceDetector {
    detector: Box<dyn rustface::Detector>,
}

// Safety: SeetaFaceDetector is only used from a single thread at a time
// (the inference worker owns it). The cascade's internal buffers are not
// shared across threads.
unsafe impl Send for SeetaFaceDetector {}

impl SeetaFaceDetector {
    /// Load the cascade model from `model_path`.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let path = model_path
            .to_str()
            .ok_or("Detection model path is not valid UTF-8")?;
        let mut detector = rustface::create_detector(path)?;
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESH);
        detector.set_pyramid_scale_factor(PYRAMID_SCALE);
        detector.set_slide_window_step(4, 4);
        Ok(Self { detector })
    }
}

impl FaceDetector for SeetaFaceDetector {
    fn detect(&mut self, frame: &LumaFrame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let mut image = ImageData::new(frame.data(), frame.width(), frame.height());
        let faces = self.detector.detect(&mut image);

        Ok(faces
            .iter()
            .filter_map(|face| {
                let bbox = face.bbox();
                to_region(
                    bbox.x(),
                    bbox.y(),
                    bbox.width(),
                    bbox.height(),
                    frame.width(),
                    frame.height(),
                )
            })
            .collect())
    }
}

/// Clamps a raw cascade rectangle to the frame and drops degenerate
/// results. The cascade can report boxes that start slightly off-frame.
fn to_region(
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    frame_width: u32,
    frame_height: u32,
) -> Option<Region> {
    let x1 = x.max(0);
    let y1 = y.max(0);
    let x2 = (x + width as i32).min(frame_width as i32);
    let y2 = (y + height as i32).min(frame_height as i32);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(Region {
        x: x1,
        y: y1,
        width: x2 - x1,
        height: y2 - y1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_region_inside_frame() {
        let r = to_region(10, 20, 30, 40, 100, 100).unwrap();
        assert_eq!(
            r,
            Region {
                x: 10,
                y: 20,
                width: 30,
                height: 40
            }
        );
    }

    #[test]
    fn test_to_region_clamps_negative_origin() {
        let r = to_region(-5, -10, 30, 40, 100, 100).unwrap();
        assert_eq!(r.x, 0);
        assert_eq!(r.y, 0);
        assert_eq!(r.width, 25);
        assert_eq!(r.height, 30);
    }

    #[test]
    fn test_to_region_clamps_far_edge() {
        let r = to_region(90, 95, 30, 30, 100, 100).unwrap();
        assert_eq!(r.width, 10);
        assert_eq!(r.height, 5);
    }

    #[test]
    fn test_to_region_fully_outside_is_none() {
        assert!(to_region(150, 0, 30, 30, 100, 100).is_none());
        assert!(to_region(0, -50, 30, 30, 100, 100).is_none());
    }

    #[test]
    fn test_to_region_zero_sized_is_none() {
        assert!(to_region(10, 10, 0, 30, 100, 100).is_none());
        assert!(to_region(10, 10, 30, 0, 100, 100).is_none());
    }
}
