use std::sync::Mutex;

use moodsense_core::pipeline::frame_throttle::FrameThrottle;

use crate::worker::InferenceWorker;

/// Shared per-process state behind the request handlers.
///
/// The throttle is the only cross-request mutable state; the mutex
/// serializes concurrent camera requests over it.
pub struct AppState {
    pub worker: InferenceWorker,
    pub throttle: Mutex<FrameThrottle>,
}
