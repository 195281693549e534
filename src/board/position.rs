use cozy_chess::{Board, Color, Move, Piece};
use crate::board::notation;
use crate::error::PositionError;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A legal move tagged with the facts the search needs, detached from
/// cozy-chess's own move flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineMove {
    pub mv: Move,
    pub is_capture: bool,
}

/// Immutable chess position. Applying a move yields a new `Position`.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
}

pub fn opponent(color: Color) -> Color {
    match color { Color::White => Color::Black, Color::Black => Color::White }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: Board::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Board::from_fen(fen.trim(), false)
            .map(|board| Self { board })
            .map_err(|e| PositionError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    /// FEN without the move counters: placement, side to move, castling and
    /// en passant. Two positions with equal keys are the same for repetition.
    pub fn position_key(&self) -> String {
        key_of_fen(&self.fen())
    }

    pub fn turn(&self) -> Color { self.board.side_to_move() }

    pub fn legal_moves(&self) -> Vec<EngineMove> {
        let mut out = Vec::with_capacity(48);
        self.board.generate_moves(|ml| {
            for m in ml { out.push(EngineMove { mv: m, is_capture: self.is_capture(m) }); }
            false
        });
        out
    }

    pub fn legal_move_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|ml| { ct += ml.len(); false });
        ct
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    /// Legal-move count of the opponent if the side to move could pass.
    /// Passing out of check is impossible, so that case counts as zero.
    pub fn null_move_mobility(&self) -> usize {
        match self.board.null_move() {
            Some(nb) => {
                let mut ct = 0usize;
                nb.generate_moves(|ml| { ct += ml.len(); false });
                ct
            }
            None => 0,
        }
    }

    pub fn play(&self, m: &EngineMove) -> Position {
        let mut board = self.board.clone();
        board.play(m.mv);
        Position { board }
    }

    pub fn uci(&self, m: &EngineMove) -> String {
        notation::move_to_uci(&self.board, m.mv)
    }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn is_checkmate(&self) -> bool { self.in_check() && !self.has_legal_moves() }

    pub fn is_stalemate(&self) -> bool { !self.in_check() && !self.has_legal_moves() }

    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let minors = (b.pieces(Piece::Knight) | b.pieces(Piece::Bishop)).len();
        minors <= 1
    }

    /// Drawn by stalemate, the fifty-move rule or bare material. Repetition
    /// needs game history, which a single FEN does not carry.
    pub fn is_draw(&self) -> bool {
        self.is_draw_by_rule() || self.is_stalemate()
    }

    /// Fifty-move rule or bare material; no move generation needed.
    pub fn is_draw_by_rule(&self) -> bool {
        self.board.halfmove_clock() >= 100 || self.is_insufficient_material()
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_legal_moves() || self.is_draw()
    }

    fn is_capture(&self, m: Move) -> bool {
        let us = self.board.side_to_move();
        match self.board.color_on(m.to) {
            Some(c) => c != us,
            // a pawn changing file onto an empty square is en passant
            None => self.board.piece_on(m.from) == Some(Piece::Pawn) && m.from.file() != m.to.file(),
        }
    }
}

pub fn key_of_fen(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_moves_and_no_captures() {
        let p = Position::startpos();
        let moves = p.legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|m| !m.is_capture));
        assert_eq!(p.fen(), START_FEN);
    }

    #[test]
    fn en_passant_is_flagged_as_capture() {
        let p = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep = p.legal_moves().into_iter().find(|m| p.uci(m) == "e5d6").expect("e5d6 legal");
        assert!(ep.is_capture);
    }

    #[test]
    fn position_key_drops_counters() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 7 30").unwrap();
        assert_eq!(a.position_key(), b.position_key());
    }

    #[test]
    fn bare_kings_are_drawn() {
        let p = Position::from_fen("k7/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        assert!(p.is_draw());
        assert!(p.is_game_over());
    }

    #[test]
    fn rejects_garbage_fen() {
        assert!(Position::from_fen("not a fen").is_err());
    }
}
