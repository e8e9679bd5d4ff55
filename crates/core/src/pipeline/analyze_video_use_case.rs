use std::path::Path;

use crate::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use crate::pipeline::error::AnalysisError;
use crate::shared::analysis::FrameAnalysis;
use crate::video::domain::video_reader::VideoReader;

/// Video analysis pipeline: decode sequentially, analyze every frame.
///
/// Frames are processed one at a time with no sampling, parallelism or
/// frame cap. A container that cannot be opened, and a decode failure
/// mid-stream, both end iteration the same way end-of-stream does; the
/// frames decoded so far are the result.
pub struct AnalyzeVideoUseCase {
    reader: Box<dyn VideoReader>,
}

impl AnalyzeVideoUseCase {
    pub fn new(reader: Box<dyn VideoReader>) -> Self {
        Self { reader }
    }

    /// Analyzes the video at `path`, returning one record per decoded
    /// frame with `frame_index` counting from 0.
    pub fn execute(
        &mut self,
        path: &Path,
        analyzer: &mut AnalyzeFrameUseCase,
    ) -> Result<Vec<FrameAnalysis>, AnalysisError> {
        if let Err(e) = self.reader.open(path) {
            log::warn!("Could not open video {}: {e}", path.display());
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for (frame_index, item) in self.reader.frames().enumerate() {
            let frame = match item {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Video decode ended at frame {frame_index}: {e}");
                    break;
                }
            };
            let faces = analyzer.execute(&frame)?;
            results.push(FrameAnalysis { frame_index, faces });
        }

        self.reader.close();
        log::debug!("Analyzed {} frames from {}", results.len(), path.display());
        Ok(results)
    }
}
