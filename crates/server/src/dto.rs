use serde::Serialize;

use moodsense_core::shared::analysis::{FacePrediction, FrameAnalysis};

/// Wire form of a successful `/detect` call.
#[derive(Serialize, Debug)]
pub struct DetectResponse {
    pub frame_count: usize,
    pub results: Vec<FrameResultDto>,
}

#[derive(Serialize, Debug)]
pub struct FrameResultDto {
    pub frame_index: usize,
    pub faces: Vec<FaceDto>,
}

#[derive(Serialize, Debug)]
pub struct FaceDto {
    #[serde(rename = "box")]
    pub bbox: [i32; 4],
    pub emotion: String,
    pub score: f32,
}

impl From<&FacePrediction> for FaceDto {
    fn from(face: &FacePrediction) -> Self {
        Self {
            bbox: [
                face.region.x,
                face.region.y,
                face.region.width,
                face.region.height,
            ],
            emotion: face.emotion.as_str().to_string(),
            score: face.score,
        }
    }
}

impl DetectResponse {
    /// Response for one frame's worth of predictions (image and camera
    /// modes).
    pub fn single_frame(faces: &[FacePrediction]) -> Self {
        Self {
            frame_count: 1,
            results: vec![FrameResultDto {
                frame_index: 0,
                faces: faces.iter().map(FaceDto::from).collect(),
            }],
        }
    }

    /// Response for a sequence of analyzed frames (video mode); the
    /// frame count is the number of decoded frames.
    pub fn from_frames(frames: &[FrameAnalysis]) -> Self {
        Self {
            frame_count: frames.len(),
            results: frames
                .iter()
                .map(|f| FrameResultDto {
                    frame_index: f.frame_index,
                    faces: f.faces.iter().map(FaceDto::from).collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodsense_core::classification::domain::emotion::Emotion;
    use moodsense_core::shared::region::Region;

    fn prediction() -> FacePrediction {
        FacePrediction {
            region: Region {
                x: 10,
                y: 20,
                width: 30,
                height: 40,
            },
            emotion: Emotion::Happy,
            score: 0.9,
        }
    }

    #[test]
    fn test_box_serializes_as_array() {
        let dto = FaceDto::from(&prediction());
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["box"], serde_json::json!([10, 20, 30, 40]));
        assert_eq!(json["emotion"], "happy");
    }

    #[test]
    fn test_single_frame_shape() {
        let resp = DetectResponse::single_frame(&[prediction()]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["frame_count"], 1);
        assert_eq!(json["results"][0]["frame_index"], 0);
        assert_eq!(json["results"][0]["faces"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_from_frames_counts_frames() {
        let frames = vec![
            FrameAnalysis {
                frame_index: 0,
                faces: vec![],
            },
            FrameAnalysis {
                frame_index: 1,
                faces: vec![prediction()],
            },
        ];
        let resp = DetectResponse::from_frames(&frames);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["frame_count"], 2);
        assert_eq!(json["results"][1]["frame_index"], 1);
    }
}
