use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chessboard_core::BoardController;

mod config;
mod error;
mod routes;

use config::Config;

/// One game per server; requests take turns on the mutex.
pub struct AppState {
    game: Mutex<BoardController>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            game: Mutex::new(BoardController::new()),
        }
    }

    /// A handler that panicked mid-request cannot leave the game half
    /// updated, so a poisoned lock is still safe to use.
    pub fn game(&self) -> MutexGuard<'_, BoardController> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/click", post(routes::board::click))
        .route("/reset", post(routes::board::reset))
        .route("/history/clear", post(routes::board::clear_history))
        .route("/api/state", get(routes::board::state))
        .route("/api/legal", get(routes::board::legal_moves))
        .route("/api/move", post(routes::board::move_piece))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chessboard_web=debug")),
        )
        .init();

    let config = Config::parse();
    let state = Arc::new(AppState::new());
    let app = router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!(static_dir = %config.static_dir.display(), "Server running at http://{}", config.addr());

    axum::serve(listener, app).await
}
