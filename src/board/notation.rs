// Move notation conversion.
// UCI strings are always emitted in the standard form (`e1g1` for short
// castling) even though cozy-chess encodes castling as the king capturing
// its own rook. SAN is only accepted as input, for opening book moves.

use cozy_chess::{Board, File, Move, Piece, Square};
use crate::error::NotationError;

fn is_castling(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.from) == Some(Piece::King) && board.color_on(mv.to) == Some(board.side_to_move())
}

pub fn move_to_uci(board: &Board, mv: Move) -> String {
    if is_castling(board, mv) {
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) { File::G } else { File::C };
        let to = Square::new(file, mv.from.rank());
        return format!("{}{}", mv.from, to);
    }
    format!("{}", mv)
}

pub fn uci_to_move(board: &Board, uci: &str) -> Result<Move, NotationError> {
    let want = uci.trim().to_ascii_lowercase();
    if want.len() < 4 || want.len() > 5 { return Err(NotationError::Malformed(uci.to_string())); }
    let mut found = None;
    board.generate_moves(|ml| {
        for m in ml { if move_to_uci(board, m) == want { found = Some(m); break; } }
        found.is_some()
    });
    found.ok_or_else(|| NotationError::Illegal(uci.to_string()))
}

fn piece_from_letter(c: char) -> Option<Piece> {
    match c {
        'N' => Some(Piece::Knight),
        'B' => Some(Piece::Bishop),
        'R' => Some(Piece::Rook),
        'Q' => Some(Piece::Queen),
        'K' => Some(Piece::King),
        _ => None,
    }
}

fn find_castle(board: &Board, san: &str, kingside: bool) -> Result<Move, NotationError> {
    let mut found = None;
    board.generate_moves(|ml| {
        for m in ml {
            if !is_castling(board, m) { continue; }
            let right = (m.to.file() as usize) > (m.from.file() as usize);
            if right == kingside { found = Some(m); break; }
        }
        found.is_some()
    });
    found.ok_or_else(|| NotationError::Illegal(san.to_string()))
}

/// Resolve a SAN string (`Nf3`, `exd5`, `e8=Q+`, `O-O`) against the legal
/// moves of `board`.
pub fn san_to_move(board: &Board, san: &str) -> Result<Move, NotationError> {
    let clean = san.trim().trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
    match clean {
        "O-O" | "0-0" => return find_castle(board, san, true),
        "O-O-O" | "0-0-0" => return find_castle(board, san, false),
        _ => {}
    }
    let malformed = || NotationError::Malformed(san.to_string());

    let mut body: Vec<char> = clean.chars().filter(|&c| c != 'x' && c != '-').collect();
    let mut promotion = None;
    if let Some(eq) = body.iter().position(|&c| c == '=') {
        let tail: Vec<char> = body.split_off(eq);
        if tail.len() != 2 { return Err(malformed()); }
        promotion = Some(piece_from_letter(tail[1]).filter(|p| *p != Piece::King).ok_or_else(malformed)?);
    } else if body.len() >= 3 && body[body.len() - 2].is_ascii_digit() {
        if let Some(p) = body.last().copied().and_then(piece_from_letter) {
            if p == Piece::King { return Err(malformed()); }
            promotion = Some(p);
            body.pop();
        }
    }

    let piece = match body.first().copied().and_then(piece_from_letter) {
        Some(p) => { body.remove(0); p }
        None => Piece::Pawn,
    };
    if body.len() < 2 { return Err(malformed()); }
    let dest: String = body[body.len() - 2..].iter().collect();
    let hints = &body[..body.len() - 2];
    let dest_ok = matches!(dest.as_bytes(), [f, r] if (b'a'..=b'h').contains(f) && (b'1'..=b'8').contains(r));
    if !dest_ok || hints.len() > 2 { return Err(malformed()); }

    let mut matches: Vec<Move> = Vec::new();
    board.generate_moves(|ml| {
        for m in ml {
            if board.piece_on(m.from) != Some(piece) || is_castling(board, m) { continue; }
            if m.promotion != promotion || format!("{}", m.to) != dest { continue; }
            let from = format!("{}", m.from);
            if hints.iter().all(|h| from.contains(*h)) { matches.push(m); }
        }
        false
    });
    match matches.len() {
        0 => Err(NotationError::Illegal(san.to_string())),
        1 => Ok(matches[0]),
        n => Err(NotationError::Ambiguous(san.to_string(), n)),
    }
}

pub fn san_to_uci(board: &Board, san: &str) -> Result<String, NotationError> {
    san_to_move(board, san).map(|m| move_to_uci(board, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board { Board::from_fen(fen, false).expect("valid fen") }

    #[test]
    fn castling_round_trips_in_standard_form() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(san_to_uci(&b, "O-O").unwrap(), "e1g1");
        assert_eq!(san_to_uci(&b, "O-O-O").unwrap(), "e1c1");
        let m = uci_to_move(&b, "e1g1").unwrap();
        assert_eq!(move_to_uci(&b, m), "e1g1");
    }

    #[test]
    fn disambiguates_by_file() {
        let b = board("4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
        assert_eq!(san_to_uci(&b, "Rad1").unwrap(), "a1d1");
        assert!(matches!(san_to_move(&b, "Rf1"), Ok(_)));
    }

    #[test]
    fn ambiguous_without_hint() {
        let b = board("4k3/8/8/8/8/8/4K3/R6R w - - 0 1");
        assert!(matches!(san_to_move(&b, "Rd1"), Err(NotationError::Ambiguous(_, 2))));
        assert_eq!(san_to_uci(&b, "Rhd1").unwrap(), "h1d1");
    }

    #[test]
    fn promotion_with_and_without_equals() {
        let b = board("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        assert_eq!(san_to_uci(&b, "e8=Q+").unwrap(), "e7e8q");
        assert_eq!(san_to_uci(&b, "e8N").unwrap(), "e7e8n");
    }

    #[test]
    fn rejects_illegal_and_malformed() {
        let b = Board::default();
        assert!(matches!(san_to_move(&b, "Qh5"), Err(NotationError::Illegal(_))));
        assert!(matches!(san_to_move(&b, "zz"), Err(NotationError::Malformed(_))));
        assert!(matches!(uci_to_move(&b, "e2e5"), Err(NotationError::Illegal(_))));
    }
}
