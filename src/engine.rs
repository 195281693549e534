// Caller-facing engine API.
// `Engine::best_move` tries, in order: the opening book, a search on the
// worker thread, a shallow material-only search on the calling thread, and
// finally a random legal move. A failure in one stage is logged and the
// next stage runs; only a position with no legal moves yields `None`.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use std::time::Duration;
use crate::board::{notation, Position};
use crate::book::OpeningBook;
use crate::config::EngineConfig;
use crate::difficulty::Difficulty;
use crate::error::EngineError;
use crate::search::fallback;
use crate::worker::engine_worker::{MAX_MOVETIME_MS, MIN_MOVETIME_MS};
use crate::worker::{Command, GoParams, ReplyBody, WorkerClient};

// Budget for control messages that never search.
const CONTROL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveSource {
    Book,
    Worker,
    Fallback,
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BestMove {
    pub bestmove: String,
    pub source: MoveSource,
}

pub struct Engine {
    config: EngineConfig,
    book: OpeningBook,
    client: Option<WorkerClient>,
    inited: bool,
    rng: SmallRng,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let book = if config.use_book { OpeningBook::load_or_builtin(config.book_path.as_deref()) } else { OpeningBook::empty() };
        Self::with_book(config, book)
    }

    pub fn with_book(config: EngineConfig, book: OpeningBook) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { config, book, client: None, inited: false, rng }
    }

    pub fn book(&self) -> &OpeningBook { &self.book }

    /// Start the worker thread if needed and put it into the initialised state.
    pub fn init_engine(&mut self) -> Result<(), EngineError> {
        if self.inited && self.client.is_some() { return Ok(()); }
        if self.client.is_none() { self.client = Some(WorkerClient::spawn()?); }
        match self.request(Command::Init, CONTROL_TIMEOUT)? {
            ReplyBody::Inited => {
                self.inited = true;
                info!("engine ready ({} book entries)", self.book.len());
                Ok(())
            }
            other => Err(unexpected(other)),
        }
    }

    pub fn set_position(&mut self, fen: &str) -> Result<(), EngineError> {
        self.init_engine()?;
        match self.request(Command::SetPosition { fen: fen.to_string() }, CONTROL_TIMEOUT)? {
            ReplyBody::Ack => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Best move for `fen` in standard UCI notation, or `None` when the side
    /// to move has no legal move (or the FEN cannot be read).
    pub fn best_move(&mut self, fen: &str, difficulty: Difficulty) -> Option<BestMove> {
        let pos = match Position::from_fen(fen) {
            Ok(p) => p,
            Err(e) => { warn!("best_move: {e}"); return None; }
        };
        if !pos.has_legal_moves() {
            debug!("best_move: no legal moves in {fen}");
            return None;
        }

        if let Some(uci) = self.book_stage(&pos, difficulty) {
            return Some(BestMove { bestmove: uci, source: MoveSource::Book });
        }

        if self.config.use_worker {
            match self.worker_stage(&pos, difficulty) {
                Ok(Some(uci)) => return Some(BestMove { bestmove: uci, source: MoveSource::Worker }),
                Ok(None) => debug!("worker returned no move, falling back"),
                Err(e) => warn!("worker search failed, falling back: {e}"),
            }
        }

        if self.config.use_fallback_search {
            if let Some(m) = fallback::shallow_best_move(&pos, difficulty.fallback_depth()) {
                return Some(BestMove { bestmove: pos.uci(&m), source: MoveSource::Fallback });
            }
        }

        fallback::random_move(&pos, &mut self.rng).map(|m| BestMove { bestmove: pos.uci(&m), source: MoveSource::Random })
    }

    fn book_stage(&mut self, pos: &Position, difficulty: Difficulty) -> Option<String> {
        let san = self.book.book_move(&pos.fen(), difficulty, &mut self.rng)?;
        match notation::san_to_uci(pos.board(), &san) {
            Ok(uci) => Some(uci),
            Err(e) => { debug!("book move unusable: {e}"); None }
        }
    }

    fn worker_stage(&mut self, pos: &Position, difficulty: Difficulty) -> Result<Option<String>, EngineError> {
        let profile = difficulty.profile();
        let fen = pos.fen();
        let result = self.set_position(&fen).and_then(|_| {
            let params = GoParams {
                movetime: Some(profile.max_time_ms),
                depth: Some(profile.max_depth),
                nodes: Some(profile.max_nodes),
                temperature: Some(profile.temperature),
            };
            let budget = profile.max_time_ms.clamp(MIN_MOVETIME_MS, MAX_MOVETIME_MS) + self.config.reply_grace_ms;
            self.request(Command::Go(params), Duration::from_millis(budget))
        });
        let reply = match result {
            Ok(r) => r,
            Err(e) => {
                self.on_worker_error(&e);
                return Err(e);
            }
        };
        match reply {
            ReplyBody::BestMove { bestmove: Some(uci), depth, time_ms, nodes } => {
                debug!("worker: {uci} depth {depth} nodes {nodes} in {time_ms} ms");
                // never hand back anything the rules engine would reject
                notation::uci_to_move(pos.board(), &uci)
                    .map(|_| Some(uci))
                    .map_err(|e| EngineError::Worker(e.to_string()))
            }
            ReplyBody::BestMove { bestmove: None, .. } => Ok(None),
            other => Err(unexpected(other)),
        }
    }

    fn request(&self, command: Command, timeout: Duration) -> Result<ReplyBody, EngineError> {
        self.client.as_ref().ok_or(EngineError::Disconnected)?.request(command, timeout)
    }

    fn on_worker_error(&mut self, e: &EngineError) {
        match e {
            EngineError::Disconnected => {
                self.client = None;
                self.inited = false;
            }
            // the abandoned search still records its move in the worker's
            // session; the next init queues behind it and clears that
            EngineError::Timeout(_) => self.inited = false,
            _ => {}
        }
    }
}

fn unexpected(reply: ReplyBody) -> EngineError {
    match reply {
        ReplyBody::Error { error } => EngineError::Worker(error),
        other => EngineError::UnexpectedReply(format!("{other:?}")),
    }
}
