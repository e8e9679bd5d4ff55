pub const DETECTION_MODEL_NAME: &str = "seeta_fd_frontal_v1.0.bin";
pub const DETECTION_MODEL_URL: &str =
    "https://github.com/moodsense/moodsense/releases/download/v0.1.0/seeta_fd_frontal_v1.0.bin";

pub const EMOTION_MODEL_NAME: &str = "fer2013_mini_xception.onnx";
pub const EMOTION_MODEL_URL: &str =
    "https://github.com/moodsense/moodsense/releases/download/v0.1.0/fer2013_mini_xception.onnx";

/// Minimum interval between processed camera frames.
pub const CAMERA_THROTTLE_MS: u64 = 500;

/// Crop padding around detected face regions, in pixels per side.
/// Zero keeps the detector's rectangle as-is.
pub const EMOTION_OFFSETS: (i32, i32) = (0, 0);

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
