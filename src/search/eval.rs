use cozy_chess::{Color, Piece};
use crate::board::Position;

const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;

// Mate scoring helpers
pub const MATE_SCORE: i32 = 1_000_000_000;
pub const DRAW_SCORE: i32 = 0;
pub const CHECK_PENALTY: i32 = 20;

fn count_piece(pos: &Position, color: Color, piece: Piece) -> i32 {
    let b = pos.board();
    (b.colors(color) & b.pieces(piece)).len() as i32
}

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material_eval_cp_side_agnostic(pos: &Position) -> i32 {
    let w = Color::White;
    let b = Color::Black;
    (count_piece(pos, w, Piece::Pawn) - count_piece(pos, b, Piece::Pawn)) * PAWN +
    (count_piece(pos, w, Piece::Knight) - count_piece(pos, b, Piece::Knight)) * KNIGHT +
    (count_piece(pos, w, Piece::Bishop) - count_piece(pos, b, Piece::Bishop)) * BISHOP +
    (count_piece(pos, w, Piece::Rook) - count_piece(pos, b, Piece::Rook)) * ROOK +
    (count_piece(pos, w, Piece::Queen) - count_piece(pos, b, Piece::Queen)) * QUEEN
}

pub fn material_eval_cp(pos: &Position, perspective: Color) -> i32 {
    let base = material_eval_cp_side_agnostic(pos);
    if perspective == Color::White { base } else { -base }
}

/// Static evaluation of `pos` from `perspective`'s point of view.
///
/// Checkmate scores `MATE_SCORE` against the mated side and any draw is
/// exactly `DRAW_SCORE`. Otherwise the score is material, plus half the
/// mobility difference between the side to move and its opponent, minus
/// a small penalty for the side that is in check.
pub fn evaluate(pos: &Position, perspective: Color) -> i32 {
    let stm = pos.turn();
    let own = pos.legal_move_count() as i32;
    if own == 0 {
        if !pos.in_check() { return DRAW_SCORE; }
        return if stm == perspective { -MATE_SCORE } else { MATE_SCORE };
    }
    if pos.is_draw_by_rule() { return DRAW_SCORE; }

    // Raw score is White-signed; side-to-move terms are converted first.
    let stm_sign = if stm == Color::White { 1 } else { -1 };
    let mut score = material_eval_cp_side_agnostic(pos);
    let mobility = own - pos.null_move_mobility() as i32;
    score += stm_sign * mobility / 2;
    if pos.in_check() { score -= stm_sign * CHECK_PENALTY; }
    if perspective == Color::White { score } else { -score }
}
