// Weighted opening book keyed by FEN prefix.
// The book is a JSON array of `{ "fenPrefix": ..., "moves": [{ "san", "weight" }] }`.
// A prefix (usually placement plus side to move) lets one entry cover every
// position that shares that opening segment. Moves are stored in SAN and
// converted to UCI by the caller.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::difficulty::Difficulty;
use crate::error::BookError;

const BUILTIN_BOOK: &str = include_str!("../data/opening_book.json");
const RANK_DECAY: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookMove {
    pub san: String,
    #[serde(default)]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    #[serde(rename = "fenPrefix")]
    pub fen_prefix: String,
    #[serde(default)]
    pub moves: Vec<BookMove>,
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: Vec<BookEntry>,
}

impl OpeningBook {
    pub fn empty() -> Self { Self::default() }

    pub fn from_entries(entries: Vec<BookEntry>) -> Self { Self { entries } }

    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let entries: Vec<BookEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BookError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// The book shipped with the crate; an unreadable asset yields an empty book.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_BOOK).unwrap_or_else(|e| {
            warn!("builtin opening book unusable, continuing without it: {e}");
            Self::empty()
        })
    }

    /// Load `path` if given, falling back to the builtin book on any error.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load(p).unwrap_or_else(|e| {
                warn!("opening book {} unusable, using builtin: {e}", p.display());
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// First entry, in stored order, whose prefix starts `fen`.
    pub fn find_entry(&self, fen: &str) -> Option<&BookEntry> {
        let fen = fen.trim();
        self.entries.iter().find(|e| fen.starts_with(e.fen_prefix.as_str()))
    }

    /// SAN move for `fen`, sampled with the tier's rank bias.
    pub fn book_move<R: Rng + ?Sized>(&self, fen: &str, difficulty: Difficulty, rng: &mut R) -> Option<String> {
        let entry = self.find_entry(fen)?;
        let san = pick_book_move(&entry.moves, difficulty.book_bias(), rng)?;
        debug!("book hit for prefix `{}`: {san}", entry.fen_prefix);
        Some(san.to_string())
    }
}

/// Normalised `(move, weight)` pairs, heaviest first (ties keep book order).
///
/// Negative weights count as zero. When no weight is positive every move
/// gets an equal share.
pub fn normalize_weights(moves: &[BookMove]) -> Vec<(&BookMove, f64)> {
    let clamped: Vec<f64> = moves.iter().map(|m| if m.weight.is_finite() { m.weight.max(0.0) } else { 0.0 }).collect();
    let sum: f64 = clamped.iter().sum();
    let mut out: Vec<(&BookMove, f64)> = if sum > 0.0 {
        moves.iter().zip(clamped).map(|(m, w)| (m, w / sum)).collect()
    } else {
        let share = 1.0 / moves.len().max(1) as f64;
        moves.iter().map(|m| (m, share)).collect()
    };
    out.sort_by(|a, b| b.1.total_cmp(&a.1));
    out
}

/// Weighted draw among `moves` where the `rank`-th heaviest move is further
/// scaled by `0.85^(rank * bias)`. A bias of zero or less always returns the
/// heaviest move.
pub fn pick_book_move<'a, R: Rng + ?Sized>(moves: &'a [BookMove], bias: f64, rng: &mut R) -> Option<&'a str> {
    let norm = normalize_weights(moves);
    let first = norm.first()?.0.san.as_str();
    if bias <= 0.0 { return Some(first); }
    let decayed: Vec<f64> = norm.iter().enumerate()
        .map(|(rank, (_, w))| w * RANK_DECAY.powf(rank as f64 * bias))
        .collect();
    let total: f64 = decayed.iter().sum();
    if total <= 0.0 { return Some(first); }
    let mut r = rng.gen::<f64>() * total;
    for ((m, _), w) in norm.iter().zip(&decayed) {
        if r < *w { return Some(m.san.as_str()); }
        r -= w;
    }
    Some(first)
}
