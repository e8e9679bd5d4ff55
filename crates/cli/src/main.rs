use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use moodsense_core::classification::infrastructure::onnx_emotion_classifier::OnnxEmotionClassifier;
use moodsense_core::detection::infrastructure::seeta_face_detector::SeetaFaceDetector;
use moodsense_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use moodsense_core::pipeline::analyze_video_use_case::AnalyzeVideoUseCase;
use moodsense_core::shared::analysis::FrameAnalysis;
use moodsense_core::shared::constants::{
    DETECTION_MODEL_NAME, DETECTION_MODEL_URL, EMOTION_MODEL_NAME, EMOTION_MODEL_URL,
    EMOTION_OFFSETS, IMAGE_EXTENSIONS,
};
use moodsense_core::shared::model_resolver;
use moodsense_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use moodsense_core::video::infrastructure::image_decoder;

/// Face emotion analysis for images and videos.
#[derive(Parser)]
#[command(name = "moodsense")]
struct Cli {
    /// Input image or video file.
    input: PathBuf,

    /// Directory checked for model files before the download cache.
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }

    let mut analyzer = build_analyzer(cli.model_dir.as_deref())?;

    let results: Vec<FrameAnalysis> = if is_image(&cli.input) {
        let frame = image_decoder::decode_image_file(&cli.input)?;
        let faces = analyzer.execute(&frame)?;
        vec![FrameAnalysis {
            frame_index: 0,
            faces,
        }]
    } else {
        let mut video = AnalyzeVideoUseCase::new(Box::new(FfmpegReader::new()));
        video.execute(&cli.input, &mut analyzer)?
    };

    let document = to_document(&results);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{rendered}");

    Ok(())
}

fn build_analyzer(
    model_dir: Option<&Path>,
) -> Result<AnalyzeFrameUseCase, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {DETECTION_MODEL_NAME}");
    let detection_path = model_resolver::resolve(
        DETECTION_MODEL_NAME,
        DETECTION_MODEL_URL,
        model_dir,
        Some(Box::new(|d, t| download_progress("face detection", d, t))),
    )?;
    eprintln!();

    log::info!("Resolving model: {EMOTION_MODEL_NAME}");
    let emotion_path = model_resolver::resolve(
        EMOTION_MODEL_NAME,
        EMOTION_MODEL_URL,
        model_dir,
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

/// Renders the same JSON document the HTTP API returns.
fn to_document(results: &[FrameAnalysis]) -> serde_json::Value {
    serde_json::json!({
        "frame_count": results.len(),
        "results": results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "frame_index": r.frame_index,
                    "faces": r.faces
                        .iter()
                        .map(|f| {
                            serde_json::json!({
                                "box": [f.region.x, f.region.y, f.region.width, f.region.height],
                                "emotion": f.emotion.as_str(),
                                "score": f.score,
                            })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn download_progress(label: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {label} model... {pct}%");
    } else {
        eprint!("\rDownloading {label} model... {downloaded} bytes");
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
