use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use moodsense_core::shared::frame::Frame;
use moodsense_core::video::infrastructure::image_decoder;

use crate::dto::DetectResponse;
use crate::state::AppState;
use crate::worker::{Job, WorkerError};

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /detect`: multipart fields `file` (binary) and `input_type`
/// (`"image" | "video" | "camera"`).
///
/// Undecodable media and an unknown `input_type` are HTTP 200 with an
/// `{"error": …}` body; the request itself succeeded. Missing fields
/// are 422, inference faults 500.
pub async fn detect(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut contents: Option<Vec<u8>> = None;
    let mut input_type: Option<String> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => contents = field.bytes().await.ok().map(|b| b.to_vec()),
            "input_type" => input_type = field.text().await.ok(),
            _ => {}
        }
    }

    let Some(contents) = contents else {
        return missing_field("file");
    };
    let Some(input_type) = input_type else {
        return missing_field("input_type");
    };

    match input_type.as_str() {
        "image" => detect_image(&state, &contents).await,
        "video" => detect_video(&state, &contents).await,
        "camera" => detect_camera(&state, &contents).await,
        _ => error_response(
            StatusCode::OK,
            "Invalid input_type. Use 'image', 'video', or 'camera'.",
        ),
    }
}

async fn detect_image(state: &AppState, contents: &[u8]) -> Response {
    let frame = match image_decoder::decode_image_bytes(contents) {
        Ok(frame) => frame,
        Err(e) => {
            log::debug!("Image decode failed: {e}");
            return error_response(StatusCode::OK, "Invalid image");
        }
    };
    analyze_single_frame(state, frame).await
}

async fn detect_camera(state: &AppState, contents: &[u8]) -> Response {
    let frame = match image_decoder::decode_image_bytes(contents) {
        Ok(frame) => frame,
        Err(e) => {
            log::debug!("Camera frame decode failed: {e}");
            return error_response(StatusCode::OK, "Invalid frame");
        }
    };

    let acquired = state.throttle.lock().unwrap().try_acquire(Instant::now());
    if !acquired {
        // Frame arrived too soon: skip inference, report no faces.
        return (StatusCode::OK, Json(DetectResponse::single_frame(&[]))).into_response();
    }

    analyze_single_frame(state, frame).await
}

async fn detect_video(state: &AppState, contents: &[u8]) -> Response {
    // The temp file outlives the analysis and is removed by RAII on
    // every exit path.
    let mut tmp = match tempfile::Builder::new().suffix(".mp4").tempfile() {
        Ok(tmp) => tmp,
        Err(e) => {
            log::error!("Could not create temp file for video upload: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Could not store upload");
        }
    };
    if let Err(e) = tmp.write_all(contents) {
        log::error!("Could not write video upload: {e}");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Could not store upload");
    }

    match state
        .worker
        .analyze(Job::Video(tmp.path().to_path_buf()))
        .await
    {
        Ok(results) => {
            (StatusCode::OK, Json(DetectResponse::from_frames(&results))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn analyze_single_frame(state: &AppState, frame: Frame) -> Response {
    match state.worker.analyze(Job::Frame(frame)).await {
        Ok(results) => {
            let faces = results.first().map(|r| r.faces.as_slice()).unwrap_or(&[]);
            (StatusCode::OK, Json(DetectResponse::single_frame(faces))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn missing_field(name: &str) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        &format!("Missing '{name}' field"),
    )
}

fn internal_error(e: WorkerError) -> Response {
    log::error!("Inference failed: {e}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
}
