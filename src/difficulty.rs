use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Master,
}

/// Search budget and sampling knobs for one difficulty tier.
///
/// `max_nodes`, `top_n`, `temperature` and `blunder_rate` are carried for
/// callers that want them; the search itself is bounded by depth and time
/// only and always plays its best move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub max_depth: u32,
    pub max_time_ms: u64,
    pub max_nodes: u64,
    pub top_n: usize,
    pub temperature: f64,
    pub blunder_rate: f64,
}

const EASY: Profile = Profile { max_depth: 2, max_time_ms: 300, max_nodes: 20_000, top_n: 5, temperature: 1.2, blunder_rate: 0.20 };
const MEDIUM: Profile = Profile { max_depth: 3, max_time_ms: 800, max_nodes: 80_000, top_n: 3, temperature: 0.6, blunder_rate: 0.08 };
const HARD: Profile = Profile { max_depth: 4, max_time_ms: 1500, max_nodes: 250_000, top_n: 2, temperature: 0.0, blunder_rate: 0.02 };
const MASTER: Profile = Profile { max_depth: 5, max_time_ms: 3000, max_nodes: 1_000_000, top_n: 1, temperature: 0.0, blunder_rate: 0.0 };

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Master];

    pub fn profile(self) -> Profile {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
            Difficulty::Master => MASTER,
        }
    }

    /// Rank-decay exponent for opening book sampling. Easy sticks to the most
    /// popular lines; stronger tiers sample the book more evenly.
    pub fn book_bias(self) -> f64 {
        match self {
            Difficulty::Easy => 1.5,
            Difficulty::Medium => 0.8,
            Difficulty::Hard | Difficulty::Master => 0.2,
        }
    }

    /// Depth of the material-only search run when the worker is unavailable.
    pub fn fallback_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard | Difficulty::Master => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "master" => Ok(Difficulty::Master),
            other => Err(format!("unknown difficulty `{other}` (expected easy, medium, hard or master)")),
        }
    }
}

/// Pick from `items` (best first) with exponentially decaying preference
/// for lower ranks. A temperature of zero or a single item is deterministic.
pub fn pick_with_temperature<'a, T, R: Rng + ?Sized>(items: &'a [T], temperature: f64, rng: &mut R) -> Option<&'a T> {
    if items.is_empty() { return None; }
    if temperature <= 0.0 || items.len() == 1 { return items.first(); }
    let t = temperature.max(0.001);
    let weights: Vec<f64> = (0..items.len()).map(|rank| (-(rank as f64) / t).exp()).collect();
    let total: f64 = weights.iter().sum();
    let mut r = rng.gen::<f64>() * total;
    for (item, w) in items.iter().zip(&weights) {
        if r < *w { return Some(item); }
        r -= w;
    }
    items.first()
}
