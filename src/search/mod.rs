pub mod alphabeta;
pub mod eval;
pub mod fallback;
pub mod ordering;
pub mod session;

pub use alphabeta::{search, SearchLimits, SearchOutcome, Searcher};
pub use session::SearchSession;
