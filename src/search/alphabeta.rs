use cozy_chess::Color;
use log::debug;
use std::time::{Duration, Instant};
use crate::board::{EngineMove, Position};
use crate::board::position::opponent;
use crate::search::eval::evaluate;
use crate::search::ordering::{order_moves, ordered_captures};
use crate::search::session::SearchSession;

pub const MIN_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 8;
// Never i32::MIN, so negation is always safe.
pub const INFINITY: i32 = i32::MAX;
// Window tightening applied when a child repeats a recent position.
pub const REPETITION_MARGIN: i32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub depth: u32,
    pub movetime: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self { Self { depth: 3, movetime: Duration::from_millis(1000) } }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: EngineMove,
    pub bestmove: String,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Fixed-depth alpha-beta search with a quiescence tail.
///
/// The time budget is soft: it is polled before each root move, on entry to
/// every interior node and before each quiescence capture, but a recursion
/// that has already started always runs to completion.
pub struct Searcher<'s> {
    session: &'s SearchSession,
    depth: u32,
    budget: Duration,
    start: Instant,
    nodes: u64,
}

impl<'s> Searcher<'s> {
    pub fn new(session: &'s SearchSession, limits: SearchLimits) -> Self {
        Self {
            session,
            depth: limits.depth.clamp(MIN_DEPTH, MAX_DEPTH),
            budget: limits.movetime,
            start: Instant::now(),
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    fn out_of_time(&self) -> bool { self.start.elapsed() > self.budget }

    pub fn qsearch_eval_cp(&mut self, pos: &Position) -> i32 {
        self.quiescence(pos, -INFINITY, INFINITY, pos.turn())
    }

    /// Capture-only negamax below the main search horizon. `perspective` is
    /// the side to move at `pos`; the result lies within `[alpha, beta]`.
    pub fn quiescence(&mut self, pos: &Position, mut alpha: i32, beta: i32, perspective: Color) -> i32 {
        self.nodes += 1;
        // Stand pat
        let stand = evaluate(pos, perspective);
        if stand >= beta { return beta; }
        if stand > alpha { alpha = stand; }

        for m in ordered_captures(pos.legal_moves()) {
            if self.out_of_time() { break; }
            let child = pos.play(&m);
            let score = -self.quiescence(&child, -beta, -alpha, opponent(perspective));
            if score >= beta { return beta; }
            if score > alpha { alpha = score; }
        }
        alpha
    }

    fn minimax(&mut self, pos: &Position, depth: u32, mut alpha: i32, mut beta: i32, maxing: bool, perspective: Color) -> i32 {
        self.nodes += 1;
        if self.out_of_time() || pos.is_draw_by_rule() { return evaluate(pos, perspective); }
        if depth == 0 {
            // quiescence scores for the side to move; flip into our frame
            return if maxing {
                self.quiescence(pos, alpha, beta, perspective)
            } else {
                -self.quiescence(pos, -beta, -alpha, opponent(perspective))
            };
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() { return evaluate(pos, perspective); }
        order_moves(&mut moves);

        if maxing {
            let mut best = -INFINITY;
            for m in &moves {
                let child = pos.play(m);
                let repeated = self.session.is_recent(&child.position_key());
                let v = self.minimax(&child, depth - 1, alpha, beta, false, perspective);
                if v > best { best = v; }
                if v > alpha { alpha = v; }
                if repeated { beta = beta.min(v.saturating_add(REPETITION_MARGIN)); }
                if alpha >= beta { break; }
            }
            best
        } else {
            let mut best = INFINITY;
            for m in &moves {
                let child = pos.play(m);
                let repeated = self.session.is_recent(&child.position_key());
                let v = self.minimax(&child, depth - 1, alpha, beta, true, perspective);
                if v < best { best = v; }
                if v < beta { beta = v; }
                if repeated { alpha = alpha.max(v.saturating_sub(REPETITION_MARGIN)); }
                if alpha >= beta { break; }
            }
            best
        }
    }

    /// Best root move by full-window search of every candidate; ties keep the
    /// first one found. Returns `None` only when there is no legal move.
    pub fn search_root(&mut self, root: &Position) -> Option<SearchOutcome> {
        let perspective = root.turn();
        let mut moves = root.legal_moves();
        if moves.is_empty() { return None; }
        order_moves(&mut moves);
        let several = moves.len() > 1;

        let mut best: Option<(EngineMove, i32)> = None;
        for m in &moves {
            if best.is_some() && self.out_of_time() {
                debug!("time budget spent after {} nodes, keeping best so far", self.nodes);
                break;
            }
            let child = root.play(m);
            if several && self.session.last_result() == Some(child.position_key().as_str()) {
                debug!("skipping {} to avoid undoing the previous move", root.uci(m));
                continue;
            }
            let score = self.minimax(&child, self.depth - 1, -INFINITY, INFINITY, false, perspective);
            if best.map_or(true, |(_, bs)| score > bs) { best = Some((*m, score)); }
        }

        best.map(|(m, score)| SearchOutcome {
            best: m,
            bestmove: root.uci(&m),
            score,
            depth: self.depth,
            nodes: self.nodes,
            elapsed: self.start.elapsed(),
        })
    }
}

/// Run a search and, when it yields a move, remember the resulting position
/// in `session` so later searches avoid repeating it.
pub fn search(root: &Position, limits: SearchLimits, session: &mut SearchSession) -> Option<SearchOutcome> {
    let outcome = Searcher::new(session, limits).search_root(root);
    if let Some(ref o) = outcome {
        session.record(root.play(&o.best).position_key());
        debug!("search: best {} score {} depth {} nodes {} in {:?}", o.bestmove, o.score, o.depth, o.nodes, o.elapsed);
    }
    outcome
}
