use log::{debug, info, warn};
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};
use crate::board::Position;
use crate::board::position::START_FEN;
use crate::error::WorkerError;
use crate::search::{self, SearchLimits, SearchSession};
use crate::search::alphabeta::{MAX_DEPTH, MIN_DEPTH};
use crate::worker::protocol::{Command, GoParams, ReplyBody, WorkerReply, WorkerRequest};

pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_MOVETIME_MS: u64 = 1000;
pub const MIN_MOVETIME_MS: u64 = 100;
pub const MAX_MOVETIME_MS: u64 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    Uninitialized,
    Idle,
}

/// Command handler that owns one search at a time plus the session memory
/// that persists between searches for the lifetime of the worker.
#[derive(Debug)]
pub struct EngineWorker {
    state: WorkerState,
    fen: String,
    session: SearchSession,
}

impl Default for EngineWorker {
    fn default() -> Self { Self::new() }
}

impl EngineWorker {
    pub fn new() -> Self {
        Self { state: WorkerState::Uninitialized, fen: START_FEN.to_string(), session: SearchSession::new() }
    }

    pub fn state(&self) -> WorkerState { self.state }

    pub fn fen(&self) -> &str { &self.fen }

    pub fn session(&self) -> &SearchSession { &self.session }

    pub fn handle(&mut self, req: WorkerRequest) -> WorkerReply {
        let body = self.dispatch(req.command).unwrap_or_else(|e| {
            debug!("request {} failed: {e}", req.id);
            ReplyBody::Error { error: e.to_string() }
        });
        WorkerReply { id: req.id, body }
    }

    fn dispatch(&mut self, command: Command) -> Result<ReplyBody, WorkerError> {
        if let Command::Unknown(kind) = &command {
            warn!("unknown worker command `{kind}`");
            return Err(WorkerError::UnknownCommand);
        }
        if let Command::Init = command {
            if self.state == WorkerState::Uninitialized { info!("search worker initialised"); }
            // a fresh init forgets what earlier searches played
            self.session.clear();
            self.state = WorkerState::Idle;
            return Ok(ReplyBody::Inited);
        }
        if self.state == WorkerState::Uninitialized { return Err(WorkerError::NotInited); }

        match command {
            Command::SetPosition { fen } => {
                self.fen = fen;
                Ok(ReplyBody::Ack)
            }
            Command::Go(params) => self.go(&params),
            // searches run to completion on this thread, so there is never
            // anything in flight to interrupt by the time stop is read
            Command::Stop => Ok(ReplyBody::Stopped),
            Command::SetOption { name, .. } => {
                debug!("ignoring option `{name}`");
                Ok(ReplyBody::Ack)
            }
            Command::Malformed { kind, reason } => Err(WorkerError::BadPayload(format!("{kind}: {reason}"))),
            Command::Init | Command::Unknown(_) => Err(WorkerError::UnknownCommand),
        }
    }

    fn go(&mut self, params: &GoParams) -> Result<ReplyBody, WorkerError> {
        let depth = params.depth.unwrap_or(DEFAULT_DEPTH).clamp(MIN_DEPTH, MAX_DEPTH);
        let movetime = params.movetime.unwrap_or(DEFAULT_MOVETIME_MS).clamp(MIN_MOVETIME_MS, MAX_MOVETIME_MS);
        let pos = Position::from_fen(&self.fen).map_err(|e| WorkerError::SearchFailed(e.to_string()))?;
        let limits = SearchLimits { depth, movetime: Duration::from_millis(movetime) };

        let t0 = Instant::now();
        let session = &mut self.session;
        let result = panic::catch_unwind(AssertUnwindSafe(|| search::search(&pos, limits, session)));
        let outcome = result.map_err(|_| WorkerError::SearchFailed("search panicked".to_string()))?;

        let time_ms = t0.elapsed().as_millis() as u64;
        let nodes = outcome.as_ref().map_or(0, |o| o.nodes);
        Ok(ReplyBody::BestMove { bestmove: outcome.map(|o| o.bestmove), depth, time_ms, nodes })
    }
}
