pub mod position;
pub mod notation;

pub use position::{EngineMove, Position};
