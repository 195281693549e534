// Chess move-search engine: opening book, alpha-beta search and a worker boundary
pub mod board;
pub mod book;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod search;
pub mod worker;

pub use config::EngineConfig;
pub use difficulty::{Difficulty, Profile};
pub use engine::{BestMove, Engine, MoveSource};
