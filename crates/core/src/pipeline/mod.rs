pub mod analyze_frame_use_case;
pub mod analyze_video_use_case;
pub mod error;
pub mod frame_throttle;
