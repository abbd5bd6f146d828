use askama::Template;
use axum::{extract::State, response::Html};
use std::sync::Arc;

use chessboard_core::{BoardController, Coord};

use crate::error::AppError;
use crate::AppState;

pub mod board;

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub ranks: Vec<Vec<SquareView>>,
    pub status: String,
    pub game_over: bool,
    pub history: Vec<String>,
}

pub struct SquareView {
    pub square: String,
    pub dark: bool,
    pub selected: bool,
    pub target: bool,
    pub has_piece: bool,
    pub code: String,
    pub glyph: String,
}

impl BoardTemplate {
    pub fn from_game(game: &BoardController) -> Self {
        let adapter = game.adapter();
        let board = adapter.board();

        let ranks = board
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter_map(|(col, piece)| {
                        let at = Coord::new(row as u8, col as u8).ok()?;
                        Some(SquareView {
                            square: at.to_algebraic().to_string(),
                            dark: at.is_dark(),
                            selected: game.is_selected(at),
                            target: game.is_target(at),
                            has_piece: piece.is_some(),
                            code: piece.map(|p| p.to_string()).unwrap_or_default(),
                            glyph: piece.map(|p| p.glyph().to_string()).unwrap_or_default(),
                        })
                    })
                    .collect()
            })
            .collect();

        let status = adapter.status();

        BoardTemplate {
            title: "Chessboard".to_string(),
            ranks,
            status: status.to_string(),
            game_over: status.is_over(),
            history: adapter.formatted_history(),
        }
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let template = BoardTemplate::from_game(&state.game());
    Ok(Html(template.render()?))
}

pub async fn health() -> &'static str {
    "OK"
}
