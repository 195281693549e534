use crate::board::EngineMove;

/// Captures first, otherwise generation order is kept (stable sort).
pub fn order_moves(moves: &mut [EngineMove]) {
    moves.sort_by_key(|m| !m.is_capture);
}

pub fn ordered_captures(moves: Vec<EngineMove>) -> Vec<EngineMove> {
    let mut caps: Vec<EngineMove> = moves.into_iter().filter(|m| m.is_capture).collect();
    order_moves(&mut caps);
    caps
}
