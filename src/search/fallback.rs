use rand::Rng;
use rand::seq::SliceRandom;
use crate::board::{EngineMove, Position};
use crate::search::alphabeta::INFINITY;
use crate::search::eval::{material_eval_cp, DRAW_SCORE, MATE_SCORE};
use crate::search::ordering::order_moves;

pub const MAX_FALLBACK_DEPTH: u32 = 3;

fn negamax(pos: &Position, depth: u32, mut alpha: i32, beta: i32) -> i32 {
    let mut moves = pos.legal_moves();
    if moves.is_empty() { return if pos.in_check() { -MATE_SCORE } else { DRAW_SCORE }; }
    if depth == 0 { return material_eval_cp(pos, pos.turn()); }
    order_moves(&mut moves);
    let mut best = -INFINITY;
    for m in &moves {
        let score = -negamax(&pos.play(m), depth - 1, -beta, -alpha);
        if score > best { best = score; }
        if best > alpha { alpha = best; }
        if alpha >= beta { break; }
    }
    best
}

/// Material-only alpha-beta without quiescence or time control, cheap enough
/// to run on the caller's thread when the worker is unavailable.
pub fn shallow_best_move(pos: &Position, depth: u32) -> Option<EngineMove> {
    let depth = depth.clamp(1, MAX_FALLBACK_DEPTH);
    let mut moves = pos.legal_moves();
    order_moves(&mut moves);
    let mut alpha = -INFINITY;
    let mut best: Option<EngineMove> = None;
    for m in moves {
        let score = -negamax(&pos.play(&m), depth - 1, -INFINITY, -alpha);
        if best.is_none() || score > alpha { alpha = score; best = Some(m); }
    }
    best
}

pub fn random_move<R: Rng + ?Sized>(pos: &Position, rng: &mut R) -> Option<EngineMove> {
    pos.legal_moves().choose(rng).copied()
}
