// Error types for the engine core.
// None of these escape `Engine::best_move`; the façade
// contains every failure and moves on to the next fallback stage.

use thiserror::Error;

/// Board setup failures reported by the rules-engine adapter.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// SAN / UCI move notation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("malformed move `{0}`")]
    Malformed(String),
    #[error("illegal move `{0}` in this position")]
    Illegal(String),
    #[error("ambiguous move `{0}`: {1} legal candidates")]
    Ambiguous(String, usize),
}

/// Opening book loading failures.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read opening book: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse opening book: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by the search worker as `error` replies.
///
/// The `Display` form of each variant is the wire code carried in the reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("engine_not_inited")]
    NotInited,
    #[error("unknown_command")]
    UnknownCommand,
    #[error("bad_payload: {0}")]
    BadPayload(String),
    #[error("search_failed: {0}")]
    SearchFailed(String),
}

/// Failures on the client side of the worker boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("worker replied with error `{0}`")]
    Worker(String),
    #[error("worker did not reply within {0} ms")]
    Timeout(u64),
    #[error("failed to start worker thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("worker channel closed")]
    Disconnected,
    #[error("unexpected worker reply `{0}`")]
    UnexpectedReply(String),
    #[error("failed to load engine config: {0}")]
    Config(String),
}
