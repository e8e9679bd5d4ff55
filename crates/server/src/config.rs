use std::path::PathBuf;

use clap::Parser;

use moodsense_core::shared::constants::CAMERA_THROTTLE_MS;

/// Face emotion analysis HTTP service.
#[derive(Parser, Debug)]
#[command(name = "moodsense-server")]
pub struct Config {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Directory checked for model files before the download cache.
    #[arg(long)]
    pub model_dir: Option<PathBuf>,

    /// Minimum milliseconds between processed camera frames.
    #[arg(long, default_value_t = CAMERA_THROTTLE_MS)]
    pub throttle_ms: u64,
}
