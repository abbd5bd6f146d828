//! Board adapter: grid coordinates in, rules engine behind, history alongside
//!
//! The adapter holds no board of its own. Every read goes to the rules
//! engine and every mutation is a request the engine may refuse. What the
//! adapter adds is the translation between `(row, col)` and algebraic
//! squares and the log of moves that were actually played.

use thiserror::Error;
use tracing::debug;

use crate::coords::{AlgebraicSquare, Coord, BOARD_SIZE};
use crate::error::Error;
use crate::history::{Move, MoveHistory};
use crate::piece::{Color, PieceCode, PieceKind};
use crate::rules::{RulesEngine, ShakmatyEngine};
use crate::status::GameStatus;

/// Pawns reaching the last rank always become queens.
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

/// The 8x8 grid indexed `[row][col]`, row 0 being rank 8.
pub type Board = [[Option<PieceCode>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Why a move did not happen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("source and destination are the same square")]
    NullMove,

    #[error("no piece on {0}")]
    EmptyOrigin(AlgebraicSquare),

    /// The engine refused the move.
    #[error(transparent)]
    Illegal(#[from] Error),

    #[error("the game is over")]
    GameOver,
}

pub struct BoardAdapter<E = ShakmatyEngine> {
    engine: E,
    history: MoveHistory,
}

impl BoardAdapter<ShakmatyEngine> {
    /// A fresh game at the standard starting position.
    pub fn new() -> Self {
        Self::with_engine(ShakmatyEngine::new())
    }
}

impl Default for BoardAdapter<ShakmatyEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RulesEngine> BoardAdapter<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            history: MoveHistory::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Reads the whole grid from the engine.
    pub fn board(&self) -> Board {
        let mut board: Board = Default::default();
        for coord in Coord::all() {
            board[coord.row() as usize][coord.col() as usize] = self.piece_at(coord);
        }
        board
    }

    pub fn piece_at(&self, at: Coord) -> Option<PieceCode> {
        self.engine.piece_at(at.to_algebraic())
    }

    /// Plays a move if the engine allows it and records it.
    ///
    /// Every kind of refusal comes back as `None`; use
    /// [`try_move_piece`](Self::try_move_piece) to learn why.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Option<Move> {
        self.try_move_piece(from, to).ok()
    }

    pub fn try_move_piece(&mut self, from: Coord, to: Coord) -> Result<Move, MoveRejection> {
        let result = self.apply(from, to);
        if let Err(ref rejection) = result {
            debug!(%from, %to, %rejection, "move rejected");
        }
        result
    }

    fn apply(&mut self, from: Coord, to: Coord) -> Result<Move, MoveRejection> {
        if from == to {
            return Err(MoveRejection::NullMove);
        }

        let (from_alg, to_alg) = (from.to_algebraic(), to.to_algebraic());
        let piece = self
            .piece_at(from)
            .ok_or(MoveRejection::EmptyOrigin(from_alg))?;

        self.engine
            .try_move(from_alg, to_alg, Some(DEFAULT_PROMOTION))?;

        let mv = Move { piece, from, to };
        self.history.push(mv);
        debug!(ply = self.history.len(), "{}", mv.numbered(self.history.len() - 1));
        Ok(mv)
    }

    /// Standard starting position and an empty history.
    pub fn reset_game(&mut self) {
        self.engine.reset();
        self.history.clear();
        debug!("game reset");
    }

    pub fn moves(&self) -> &[Move] {
        self.history.as_slice()
    }

    pub fn formatted_history(&self) -> Vec<String> {
        self.history.formatted()
    }

    /// Forgets the recorded moves. The position and turn stay as they are.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn current_turn(&self) -> Color {
        self.engine.turn()
    }

    pub fn is_check(&self) -> bool {
        self.engine.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.engine.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.engine.is_stalemate()
    }

    pub fn is_draw(&self) -> bool {
        self.engine.is_draw()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.engine)
    }

    pub fn legal_moves(&self, from: Coord) -> Vec<AlgebraicSquare> {
        self.engine.legal_destinations(from.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::cell::Cell;

    fn at(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn sq(s: &str) -> AlgebraicSquare {
        s.parse().unwrap()
    }

    fn codes(row: &[Option<PieceCode>]) -> Vec<String> {
        row.iter()
            .map(|p| p.map(|p| p.to_string()).unwrap_or_default())
            .collect()
    }

    fn play(adapter: &mut BoardAdapter, moves: &[((u8, u8), (u8, u8))]) {
        for (from, to) in moves {
            adapter
                .move_piece(at(from.0, from.1), at(to.0, to.1))
                .unwrap_or_else(|| panic!("{:?} -> {:?} should be legal", from, to));
        }
    }

    fn assert_start_layout(adapter: &BoardAdapter) {
        let board = adapter.board();
        assert_eq!(codes(&board[0]), ["bR", "bN", "bB", "bQ", "bK", "bB", "bN", "bR"]);
        assert_eq!(codes(&board[1]), ["bP"; 8]);
        for row in &board[2..6] {
            assert!(row.iter().all(Option::is_none));
        }
        assert_eq!(codes(&board[6]), ["wP"; 8]);
        assert_eq!(codes(&board[7]), ["wR", "wN", "wB", "wQ", "wK", "wB", "wN", "wR"]);

        for coord in Coord::all() {
            assert_eq!(adapter.piece_at(coord), board[coord.row() as usize][coord.col() as usize]);
        }
    }

    #[test]
    fn test_start_layout() {
        let adapter = BoardAdapter::new();
        assert_start_layout(&adapter);
        assert_eq!(adapter.piece_at(at(0, 0)).unwrap().to_string(), "bR");
        assert_eq!(adapter.piece_at(at(0, 4)).unwrap().to_string(), "bK");
        assert_eq!(adapter.piece_at(at(7, 4)).unwrap().to_string(), "wK");
        assert_eq!(adapter.piece_at(at(4, 4)), None);
        assert!(adapter.moves().is_empty());
    }

    #[test]
    fn test_legal_pawn_push() {
        let mut adapter = BoardAdapter::new();
        let mv = adapter.move_piece(at(6, 4), at(4, 4)).unwrap();

        assert_eq!(mv.piece.to_string(), "wP");
        assert_eq!(adapter.piece_at(at(6, 4)), None);
        assert_eq!(adapter.piece_at(at(4, 4)).unwrap().to_string(), "wP");

        assert_eq!(adapter.moves().len(), 1);
        assert_eq!(adapter.moves()[0].from, at(6, 4));
        assert_eq!(adapter.moves()[0].to, at(4, 4));
    }

    #[test]
    fn test_rejections() {
        let mut adapter = BoardAdapter::new();

        assert_eq!(adapter.move_piece(at(6, 4), at(6, 4)), None);
        assert_eq!(
            adapter.try_move_piece(at(6, 4), at(6, 4)),
            Err(MoveRejection::NullMove)
        );

        assert_eq!(adapter.move_piece(at(4, 4), at(3, 4)), None);
        assert_eq!(
            adapter.try_move_piece(at(4, 4), at(3, 4)),
            Err(MoveRejection::EmptyOrigin(sq("e4")))
        );

        // e2-e5
        assert_eq!(adapter.move_piece(at(6, 4), at(3, 4)), None);
        assert_eq!(adapter.piece_at(at(6, 4)).unwrap().to_string(), "wP");

        // Black cannot move first.
        assert!(matches!(
            adapter.try_move_piece(at(1, 4), at(3, 4)),
            Err(MoveRejection::Illegal(_))
        ));

        let rejection = adapter.try_move_piece(at(6, 4), at(3, 4)).unwrap_err();
        assert_eq!(rejection.to_string(), "illegal move e2 → e5");

        assert!(adapter.moves().is_empty());
        assert_eq!(adapter.current_turn(), Color::White);
    }

    #[test]
    fn test_rejection_changes_nothing() {
        let mut adapter = BoardAdapter::new();
        play(&mut adapter, &[((6, 4), (4, 4)), ((1, 4), (3, 4))]);

        let board = adapter.board();
        let turn = adapter.current_turn();
        let moves = adapter.moves().to_vec();

        for (from, to) in [((7, 4), (5, 4)), ((4, 4), (3, 4)), ((0, 3), (4, 7)), ((7, 0), (7, 0))] {
            assert_eq!(adapter.move_piece(at(from.0, from.1), at(to.0, to.1)), None);
            assert_eq!(adapter.board(), board);
            assert_eq!(adapter.current_turn(), turn);
            assert_eq!(adapter.moves(), moves.as_slice());
        }
    }

    #[test]
    fn test_history_and_turns() {
        let mut adapter = BoardAdapter::new();
        let sequence = [((6, 4), (4, 4)), ((1, 4), (3, 4)), ((6, 3), (4, 3)), ((3, 4), (4, 3))];
        assert_eq!(adapter.current_turn(), Color::White);

        for (n, (from, to)) in sequence.iter().enumerate() {
            let mv = adapter.move_piece(at(from.0, from.1), at(to.0, to.1)).unwrap();
            assert_eq!(adapter.moves().len(), n + 1);
            assert_eq!(adapter.moves()[n], mv);
            let expected = if n % 2 == 0 { Color::Black } else { Color::White };
            assert_eq!(adapter.current_turn(), expected);
        }

        assert_eq!(
            adapter.formatted_history(),
            ["1. wP e2 → e4", "2. bP e7 → e5", "3. wP d2 → d4", "4. bP e5 → d4"]
        );
    }

    #[test]
    fn test_capture() {
        let mut adapter = BoardAdapter::new();
        play(&mut adapter, &[((6, 4), (4, 4)), ((1, 3), (3, 3)), ((4, 4), (3, 3))]);
        assert_eq!(adapter.piece_at(at(3, 3)).unwrap().to_string(), "wP");
        assert_eq!(adapter.piece_at(at(4, 4)), None);
    }

    #[test]
    fn test_fools_mate() {
        let mut adapter = BoardAdapter::new();
        assert!(!adapter.is_check());
        assert!(!adapter.is_checkmate());
        assert!(!adapter.is_game_over());

        play(
            &mut adapter,
            &[((6, 5), (5, 5)), ((1, 4), (3, 4)), ((6, 6), (4, 6)), ((0, 3), (4, 7))],
        );

        assert!(adapter.is_check());
        assert!(adapter.is_checkmate());
        assert!(adapter.is_game_over());
        assert!(!adapter.is_stalemate());
        assert!(!adapter.is_draw());
        assert_eq!(adapter.status(), GameStatus::Checkmate { winner: Color::Black });
        assert_eq!(adapter.moves()[3].piece.to_string(), "bQ");
    }

    #[test]
    fn test_reset_restores_board_and_history() {
        let mut adapter = BoardAdapter::new();
        play(&mut adapter, &[((6, 4), (4, 4)), ((1, 4), (3, 4)), ((7, 6), (5, 5))]);

        adapter.reset_game();

        assert_start_layout(&adapter);
        assert!(adapter.moves().is_empty());
        assert_eq!(adapter.current_turn(), Color::White);
    }

    #[test]
    fn test_clear_history_keeps_position() {
        let mut adapter = BoardAdapter::new();
        play(&mut adapter, &[((6, 4), (4, 4)), ((1, 4), (3, 4))]);
        assert_eq!(adapter.moves().len(), 2);

        adapter.clear_history();

        assert!(adapter.moves().is_empty());
        assert_eq!(adapter.piece_at(at(4, 4)).unwrap().to_string(), "wP");
        assert_eq!(adapter.current_turn(), Color::White);

        adapter.move_piece(at(6, 3), at(4, 3)).unwrap();
        assert_eq!(adapter.formatted_history(), ["1. wP d2 → d4"]);
    }

    #[test]
    fn test_legal_moves() {
        let adapter = BoardAdapter::new();

        let pawn = adapter.legal_moves(at(6, 4));
        assert_eq!(pawn.len(), 2);
        assert!(pawn.contains(&sq("e3")) && pawn.contains(&sq("e4")));

        let knight = adapter.legal_moves(at(7, 1));
        assert_eq!(knight.len(), 2);
        assert!(knight.contains(&sq("a3")) && knight.contains(&sq("c3")));

        assert!(adapter.legal_moves(at(4, 4)).is_empty());
    }

    #[test]
    fn test_promotion_logs_the_pawn() {
        let engine = ShakmatyEngine::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let mut adapter = BoardAdapter::with_engine(engine);

        let mv = adapter.move_piece(at(1, 4), at(0, 4)).unwrap();
        assert_eq!(mv.piece.to_string(), "wP");
        assert_eq!(adapter.piece_at(at(0, 4)).unwrap().to_string(), "wQ");
    }

    #[test]
    fn test_castling_and_en_passant() {
        let mut adapter = BoardAdapter::new();
        // 1. e4 a6 2. e5 d5 3. exd6 e.p.
        play(&mut adapter, &[((6, 4), (4, 4)), ((1, 0), (2, 0)), ((4, 4), (3, 4)), ((1, 3), (3, 3))]);
        let ep = adapter.move_piece(at(3, 4), at(2, 3)).unwrap();
        assert_eq!(ep.piece.to_string(), "wP");
        assert_eq!(adapter.piece_at(at(3, 3)), None);
        assert_eq!(adapter.piece_at(at(2, 3)).unwrap().to_string(), "wP");

        // 3... Nf6 4. Nf3 b6 5. Bc4 b5 6. O-O
        play(&mut adapter, &[((0, 6), (2, 5)), ((7, 6), (5, 5)), ((1, 1), (2, 1)), ((7, 5), (4, 2)), ((2, 1), (3, 1))]);
        let castle = adapter.move_piece(at(7, 4), at(7, 6)).unwrap();
        assert_eq!(castle.piece.to_string(), "wK");
        assert_eq!(adapter.piece_at(at(7, 5)).unwrap().to_string(), "wR");
        assert_eq!(adapter.piece_at(at(7, 7)), None);
    }

    /// Counts calls and refuses every move.
    #[derive(Default)]
    struct RefusingEngine {
        attempts: Cell<usize>,
    }

    impl RulesEngine for RefusingEngine {
        fn piece_at(&self, _square: AlgebraicSquare) -> Option<PieceCode> {
            Some(PieceCode::new(Color::White, PieceKind::Rook))
        }

        fn try_move(
            &mut self,
            from: AlgebraicSquare,
            to: AlgebraicSquare,
            _promotion: Option<PieceKind>,
        ) -> Result<()> {
            self.attempts.set(self.attempts.get() + 1);
            Err(Error::IllegalMove { from, to })
        }

        fn legal_destinations(&self, _from: AlgebraicSquare) -> Vec<AlgebraicSquare> {
            Vec::new()
        }

        fn turn(&self) -> Color {
            Color::White
        }

        fn is_check(&self) -> bool {
            false
        }

        fn is_checkmate(&self) -> bool {
            false
        }

        fn is_stalemate(&self) -> bool {
            false
        }

        fn is_draw(&self) -> bool {
            false
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_engine_failures_are_normalized() {
        let mut adapter = BoardAdapter::with_engine(RefusingEngine::default());

        assert_eq!(adapter.move_piece(at(7, 0), at(7, 0)), None);
        assert_eq!(adapter.engine().attempts.get(), 0);

        assert_eq!(adapter.move_piece(at(7, 0), at(5, 0)), None);
        assert_eq!(adapter.engine().attempts.get(), 1);
        assert!(adapter.moves().is_empty());
        assert!(!adapter.is_game_over());
    }
}
