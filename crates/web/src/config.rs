//! Server configuration from flags, environment or `.env`

use std::path::PathBuf;

use clap::Parser;

/// Browser chess board server
#[derive(Parser, Debug, Clone)]
#[command(name = "chessboard")]
#[command(about = "Serve a playable chess board in the browser", long_about = None)]
#[command(version)]
pub struct Config {
    /// Host to bind to
    #[arg(long, env = "CHESSBOARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "CHESSBOARD_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served under /static
    #[arg(long, env = "CHESSBOARD_STATIC_DIR", default_value = "crates/web/static")]
    pub static_dir: PathBuf,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
