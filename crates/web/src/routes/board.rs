//! Board interaction: clicks, drag-and-drop moves, reset and the JSON API

use axum::{
    extract::{Query, State},
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use chessboard_core::{
    AlgebraicSquare, Board, BoardController, ClickOutcome, Color, GameStatus, Move, Selection,
};

use crate::error::AppError;
use crate::AppState;

// ============================================================================
// FORMS & REQUESTS
// ============================================================================

#[derive(Deserialize)]
pub struct ClickForm {
    pub square: String,
}

#[derive(Deserialize)]
pub struct SquareQuery {
    pub square: String,
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub status_text: String,
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub draw: bool,
    pub game_over: bool,
    pub fen: String,
    pub moves: Vec<Move>,
    pub history: Vec<String>,
    pub selection: Option<Selection>,
}

impl GameSnapshot {
    pub fn of(game: &BoardController) -> Self {
        let adapter = game.adapter();
        let status = adapter.status();

        GameSnapshot {
            board: adapter.board(),
            turn: adapter.current_turn(),
            status,
            status_text: status.to_string(),
            check: adapter.is_check(),
            checkmate: adapter.is_checkmate(),
            stalemate: adapter.is_stalemate(),
            draw: adapter.is_draw(),
            game_over: adapter.is_game_over(),
            fen: adapter.engine().fen(),
            moves: adapter.moves().to_vec(),
            history: adapter.formatted_history(),
            selection: game.selection().cloned(),
        }
    }
}

#[derive(Serialize)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub mv: Move,
    pub state: GameSnapshot,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn click(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClickForm>,
) -> Result<Redirect, AppError> {
    let square: AlgebraicSquare = form.square.parse()?;

    let outcome = state.game().click(square.to_coord());
    if let ClickOutcome::Moved(mv) = outcome {
        info!(piece = %mv.piece, from = %mv.from.to_algebraic(), to = %square, "move played");
    }

    Ok(Redirect::to("/"))
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Redirect {
    state.game().reset_game();
    info!("new game");
    Redirect::to("/")
}

pub async fn clear_history(State(state): State<Arc<AppState>>) -> Redirect {
    state.game().clear_history();
    Redirect::to("/")
}

pub async fn state(State(state): State<Arc<AppState>>) -> Json<GameSnapshot> {
    Json(GameSnapshot::of(&state.game()))
}

pub async fn legal_moves(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SquareQuery>,
) -> Result<Json<Vec<AlgebraicSquare>>, AppError> {
    let square: AlgebraicSquare = query.square.parse()?;
    Ok(Json(state.game().adapter().legal_moves(square.to_coord())))
}

/// Drag-and-drop target.
pub async fn move_piece(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    let from: AlgebraicSquare = req.from.parse()?;
    let to: AlgebraicSquare = req.to.parse()?;

    let mut game = state.game();
    let mv = game.try_drop_piece(from.to_coord(), to.to_coord())?;
    info!(piece = %mv.piece, %from, %to, "move played");

    Ok(Json(MoveResponse {
        mv,
        state: GameSnapshot::of(&game),
    }))
}
