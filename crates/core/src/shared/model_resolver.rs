use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve a model file by name.
///
/// Resolution order:
/// 1. `override_dir`, when given (e.g. a `--model-dir` flag)
/// 2. User cache directory (platform-specific)
/// 3. Download from URL into the cache
pub fn resolve(
    name: &str,
    url: &str,
    override_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Some(dir) = override_dir {
        let local_path = dir.join(name);
        if local_path.exists() {
            return Ok(local_path);
        }
    }

    let cache_dir = model_cache_dir()?;
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        return Ok(cached_path);
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/MoodSense/models/`
/// - Linux: `$XDG_CACHE_HOME/MoodSense/models/` or `~/.cache/MoodSense/models/`
/// - Windows: `%LOCALAPPDATA%/MoodSense/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("MoodSense").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("MoodSense").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url).map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    let total = response.content_length().unwrap_or(0);

    // Write to a temp file first, then rename for atomicity
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    let bytes = response.bytes().map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    // Report progress in 1MB chunks to avoid excessive callbacks
    let mut downloaded: u64 = 0;
    for chunk in bytes.chunks(1024 * 1024) {
        file.write_all(chunk)
            .map_err(|e| ModelResolveError::Write {
                path: temp_path.clone(),
                source: e,
            })?;
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_override_dir() {
        let tmp = TempDir::new().unwrap();
        let model_path = tmp.path().join("detector.bin");
        fs::write(&model_path, b"model bytes").unwrap();

        let resolved = resolve(
            "detector.bin",
            "http://invalid.nonexistent.example.com/detector.bin",
            Some(tmp.path()),
            None,
        )
        .unwrap();
        assert_eq!(resolved, model_path);
    }

    #[test]
    fn test_resolve_override_dir_miss_falls_through() {
        let tmp = TempDir::new().unwrap();
        // Empty override dir: resolution continues to cache/download and
        // the bogus URL makes the download leg fail (unless a previous run
        // cached this name, which no test does).
        let result = resolve(
            "no_such_model.bin",
            "http://invalid.nonexistent.example.com/no_such_model.bin",
            Some(tmp.path()),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let dir = model_cache_dir().unwrap();
        assert!(dir.to_string_lossy().contains("MoodSense"));
        assert!(dir.to_string_lossy().contains("models"));
    }

    #[test]
    fn test_download_invalid_url_returns_error() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let result = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_atomic_no_partial_on_failure() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.onnx");
        let _ = download("http://invalid.nonexistent.example.com/model", &dest, None);
        // Neither the dest nor the .part file should exist after failure
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}
