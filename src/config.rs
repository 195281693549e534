use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::difficulty::Difficulty;
use crate::error::EngineError;

pub const DEFAULT_REPLY_GRACE_MS: u64 = 2000;

/// Engine settings. Every field has a default, so a config file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Opening book JSON; the builtin book is used when unset or unreadable.
    pub book_path: Option<PathBuf>,
    pub use_book: bool,
    /// Run the main search on the worker thread. When off, moves come from
    /// the local fallback stages only.
    pub use_worker: bool,
    /// Run the shallow material search before resorting to a random move.
    pub use_fallback_search: bool,
    /// Seed for book sampling and the random fallback; entropy when unset.
    pub seed: Option<u64>,
    /// Extra time, beyond the search budget, to wait for a worker reply.
    pub reply_grace_ms: u64,
    pub difficulty: Difficulty,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            book_path: None,
            use_book: true,
            use_worker: true,
            use_fallback_search: true,
            seed: None,
            reply_grace_ms: DEFAULT_REPLY_GRACE_MS,
            difficulty: Difficulty::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let c = EngineConfig::from_json(r#"{ "seed": 5, "difficulty": "hard" }"#).unwrap();
        assert_eq!(c.seed, Some(5));
        assert_eq!(c.difficulty, Difficulty::Hard);
        assert!(c.use_book);
        assert!(c.use_worker && c.use_fallback_search);
        assert_eq!(c.reply_grace_ms, DEFAULT_REPLY_GRACE_MS);
    }

    #[test]
    fn rejects_unknown_difficulty() {
        assert!(EngineConfig::from_json(r#"{ "difficulty": "impossible" }"#).is_err());
    }
}
