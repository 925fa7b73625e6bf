use std::path::PathBuf;

use clap::Parser;

/// Voxgate speech gateway
#[derive(Debug, Parser)]
#[command(name = "voxgate", about = "OpenAI-compatible text-to-speech gateway for local inference engines")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "voxgate.toml", env = "VOXGATE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOXGATE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter used when neither `RUST_LOG` nor the config sets one
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}
