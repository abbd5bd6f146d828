//! Game status summary for the status bar

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::Color;
use crate::rules::RulesEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    ToMove { turn: Color },
    Check { turn: Color },
    Checkmate { winner: Color },
    Stalemate,
    /// Fifty-move rule, insufficient material or threefold repetition.
    Draw,
}

impl GameStatus {
    /// Reads the engine predicates, most final outcome first.
    pub fn of<E: RulesEngine + ?Sized>(engine: &E) -> Self {
        let turn = engine.turn();

        if engine.is_checkmate() {
            GameStatus::Checkmate {
                winner: turn.opposite(),
            }
        } else if engine.is_stalemate() {
            GameStatus::Stalemate
        } else if engine.is_draw() {
            GameStatus::Draw
        } else if engine.is_check() {
            GameStatus::Check { turn }
        } else {
            GameStatus::ToMove { turn }
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. } | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::ToMove { turn } => write!(f, "{} to move", turn.name()),
            GameStatus::Check { turn } => write!(f, "{} to move, in check", turn.name()),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate, {} wins", winner.name()),
            GameStatus::Stalemate => write!(f, "Stalemate"),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ShakmatyEngine;

    #[test]
    fn test_status_text() {
        let start = GameStatus::of(&ShakmatyEngine::new());
        assert_eq!(start, GameStatus::ToMove { turn: Color::White });
        assert_eq!(start.to_string(), "White to move");
        assert!(!start.is_over());

        let stalemate = ShakmatyEngine::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(GameStatus::of(&stalemate), GameStatus::Stalemate);
        assert!(GameStatus::of(&stalemate).is_over());

        let bare_kings = ShakmatyEngine::from_fen("8/8/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        assert_eq!(GameStatus::of(&bare_kings), GameStatus::Draw);
    }

    #[test]
    fn test_check_and_mate() {
        // 1. e4 f6 2. Qh5+
        let check = ShakmatyEngine::from_fen(
            "rnbqkbnr/ppppp1pp/5p2/7Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
        )
        .unwrap();
        let status = GameStatus::of(&check);
        assert_eq!(status, GameStatus::Check { turn: Color::Black });
        assert_eq!(status.to_string(), "Black to move, in check");

        // Fool's mate
        let mate = ShakmatyEngine::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        let status = GameStatus::of(&mate);
        assert_eq!(status, GameStatus::Checkmate { winner: Color::Black });
        assert_eq!(status.to_string(), "Checkmate, Black wins");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(GameStatus::Check { turn: Color::White }).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "check", "turn": "w" }));
    }
}
