use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;

use moodsense_core::classification::infrastructure::onnx_emotion_classifier::OnnxEmotionClassifier;
use moodsense_core::detection::infrastructure::seeta_face_detector::SeetaFaceDetector;
use moodsense_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use moodsense_core::pipeline::frame_throttle::FrameThrottle;
use moodsense_core::shared::constants::{
    DETECTION_MODEL_NAME, DETECTION_MODEL_URL, EMOTION_MODEL_NAME, EMOTION_MODEL_URL,
    EMOTION_OFFSETS,
};
use moodsense_core::shared::model_resolver;

mod app;
mod config;
mod dto;
mod handlers;
mod state;
mod worker;

use config::Config;
use state::AppState;
use worker::InferenceWorker;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    let analyzer = build_analyzer(&config)?;
    let state = Arc::new(AppState {
        worker: InferenceWorker::spawn(analyzer),
        throttle: Mutex::new(FrameThrottle::new(Duration::from_millis(config.throttle_ms))),
    });

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app::router(state)).await?;

    Ok(())
}

fn build_analyzer(config: &Config) -> Result<AnalyzeFrameUseCase, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {DETECTION_MODEL_NAME}");
    let detection_path = model_resolver::resolve(
        DETECTION_MODEL_NAME,
        DETECTION_MODEL_URL,
        config.model_dir.as_deref(),
        Some(Box::new(|d, t| download_progress("face detection", d, t))),
    )?;
    eprintln!();

    log::info!("Resolving model: {EMOTION_MODEL_NAME}");
    let emotion_path = model_resolver::resolve(
        EMOTION_MODEL_NAME,
        EMOTION_MODEL_URL,
        config.model_dir.as_deref(),
        Some(Box::new(|d, t| download_progress("emotion", d, t))),
    )?;
    eprintln!();

    let detector = SeetaFaceDetector::new(&detection_path)?;
    let classifier = OnnxEmotionClassifier::new(&emotion_path)?;
    Ok(AnalyzeFrameUseCase::new(
        Box::new(detector),
        Box::new(classifier),
        EMOTION_OFFSETS,
    ))
}

fn download_progress(label: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {label} model... {pct}%");
    } else {
        eprint!("\rDownloading {label} model... {downloaded} bytes");
    }
}
