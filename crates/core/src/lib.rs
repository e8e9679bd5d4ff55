//! Face detection and emotion classification for images, videos and
//! single camera frames.
//!
//! The pretrained models are consumed behind the [`detection`] and
//! [`classification`] domain traits; [`pipeline`] wires them into the
//! per-frame and per-video analysis routines.

pub mod classification;
pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod video;
