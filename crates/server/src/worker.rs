use std::path::PathBuf;
use std::thread;

use crossbeam_channel::Sender;
use tokio::sync::oneshot;

use moodsense_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use moodsense_core::pipeline::analyze_video_use_case::AnalyzeVideoUseCase;
use moodsense_core::pipeline::error::AnalysisError;
use moodsense_core::shared::analysis::FrameAnalysis;
use moodsense_core::shared::frame::Frame;
use moodsense_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// A unit of inference work.
pub enum Job {
    /// Analyze one decoded frame.
    Frame(Frame),
    /// Decode and analyze a video file on disk.
    Video(PathBuf),
}

#[derive(Debug)]
pub enum WorkerError {
    Analysis(AnalysisError),
    /// The worker thread is gone; the service cannot run inference.
    Disconnected,
}

impl std::fmt::Display for WorkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerError::Analysis(e) => write!(f, "{e}"),
            WorkerError::Disconnected => f.write_str("inference worker unavailable"),
        }
    }
}

type Reply = Result<Vec<FrameAnalysis>, AnalysisError>;

/// Handle to the single inference thread.
///
/// The models are `&mut self` and the cascade detector is not `Sync`,
/// so one thread owns the [`AnalyzeFrameUseCase`] and requests queue up
/// in front of it. Handlers stay async: jobs go in over a channel and
/// results come back on a oneshot.
pub struct InferenceWorker {
    tx: Sender<(Job, oneshot::Sender<Reply>)>,
}

impl InferenceWorker {
    /// Spawns the worker thread that owns the analyzer.
    pub fn spawn(mut analyzer: AnalyzeFrameUseCase) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<(Job, oneshot::Sender<Reply>)>();

        thread::spawn(move || {
            for (job, reply) in rx {
                let result = match job {
                    Job::Frame(frame) => analyzer.execute(&frame).map(|faces| {
                        vec![FrameAnalysis {
                            frame_index: 0,
                            faces,
                        }]
                    }),
                    Job::Video(path) => {
                        let mut video = AnalyzeVideoUseCase::new(Box::new(FfmpegReader::new()));
                        video.execute(&path, &mut analyzer)
                    }
                };
                // The requester may have gone away; nothing to do then.
                let _ = reply.send(result);
            }
        });

        Self { tx }
    }

    /// Queues a job and waits for its result.
    pub async fn analyze(&self, job: Job) -> Result<Vec<FrameAnalysis>, WorkerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((job, reply_tx))
            .map_err(|_| WorkerError::Disconnected)?;
        match reply_rx.await {
            Ok(result) => result.map_err(WorkerError::Analysis),
            Err(_) => Err(WorkerError::Disconnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodsense_core::classification::domain::emotion_classifier::EmotionClassifier;
    use moodsense_core::detection::domain::face_detector::FaceDetector;
    use moodsense_core::shared::luma::LumaFrame;
    use moodsense_core::shared::region::Region;
    use ndarray::Array4;

    struct OneFaceDetector;

    impl FaceDetector for OneFaceDetector {
        fn detect(
            &mut self,
            _frame: &LumaFrame,
        ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            Ok(vec![Region {
                x: 1,
                y: 1,
                width: 8,
                height: 8,
            }])
        }
    }

    struct NeutralClassifier;

    impl EmotionClassifier for NeutralClassifier {
        fn input_size(&self) -> (usize, usize) {
            (8, 8)
        }

        fn predict(&mut self, _input: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
            Ok(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0])
        }
    }

    fn stub_worker() -> InferenceWorker {
        InferenceWorker::spawn(AnalyzeFrameUseCase::new(
            Box::new(OneFaceDetector),
            Box::new(NeutralClassifier),
            (0, 0),
        ))
    }

    #[tokio::test]
    async fn test_frame_job_round_trip() {
        let worker = stub_worker();
        let frame = Frame::new(vec![50; 16 * 16 * 3], 16, 16, 0);

        let results = worker.analyze(Job::Frame(frame)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].frame_index, 0);
        assert_eq!(results[0].faces.len(), 1);
    }

    #[tokio::test]
    async fn test_worker_survives_multiple_jobs() {
        let worker = stub_worker();
        for _ in 0..3 {
            let frame = Frame::new(vec![50; 16 * 16 * 3], 16, 16, 0);
            let results = worker.analyze(Job::Frame(frame)).await.unwrap();
            assert_eq!(results[0].faces.len(), 1);
        }
    }
}
