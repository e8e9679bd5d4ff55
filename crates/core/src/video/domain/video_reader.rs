use std::path::Path;

use crate::shared::frame::Frame;

/// Reads frames from an encoded video container.
///
/// Implementations handle I/O details (codec, container format, etc.)
/// while the pipeline works with the abstract `Frame` type.
pub trait VideoReader: Send {
    /// Opens a video file for decoding.
    fn open(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in decode order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
