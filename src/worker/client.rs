use log::{debug, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use crate::error::EngineError;
use crate::worker::engine_worker::EngineWorker;
use crate::worker::protocol::{Command, ReplyBody, WorkerReply, WorkerRequest};

type PendingMap = HashMap<u64, Sender<WorkerReply>>;

/// Caller side of a search worker running on its own thread.
///
/// Requests go out over a channel tagged with a fresh id; a router thread
/// hands each reply to the resolver registered under the same id, so
/// replies can never be delivered to the wrong caller.
pub struct WorkerClient {
    tx: Option<Sender<WorkerRequest>>,
    pending: Arc<Mutex<PendingMap>>,
    next_id: AtomicU64,
    threads: Vec<JoinHandle<()>>,
}

fn lock(pending: &Mutex<PendingMap>) -> MutexGuard<'_, PendingMap> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

impl WorkerClient {
    pub fn spawn() -> Result<Self, EngineError> {
        let (req_tx, req_rx) = mpsc::channel::<WorkerRequest>();
        let (reply_tx, reply_rx) = mpsc::channel::<WorkerReply>();
        let pending: Arc<Mutex<PendingMap>> = Arc::new(Mutex::new(HashMap::new()));

        let worker = thread::Builder::new()
            .name("knightwatch-worker".into())
            .spawn(move || {
                let mut engine = EngineWorker::new();
                for req in req_rx {
                    if reply_tx.send(engine.handle(req)).is_err() { break; }
                }
                debug!("search worker shutting down");
            })?;

        let routes = pending.clone();
        let router = thread::Builder::new()
            .name("knightwatch-router".into())
            .spawn(move || {
                for reply in reply_rx {
                    match lock(&routes).remove(&reply.id) {
                        Some(resolver) => { let _ = resolver.send(reply); }
                        None => debug!("dropping reply {} with no waiting caller", reply.id),
                    }
                }
            })?;

        Ok(Self { tx: Some(req_tx), pending, next_id: AtomicU64::new(1), threads: vec![worker, router] })
    }

    pub fn pending_len(&self) -> usize { lock(&self.pending).len() }

    /// Send `command` and block until its reply arrives or `timeout` passes.
    pub fn request(&self, command: Command, timeout: Duration) -> Result<ReplyBody, EngineError> {
        let tx = self.tx.as_ref().ok_or(EngineError::Disconnected)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (resolve, wait) = mpsc::channel();
        lock(&self.pending).insert(id, resolve);

        if tx.send(WorkerRequest { id, command }).is_err() {
            lock(&self.pending).remove(&id);
            return Err(EngineError::Disconnected);
        }
        match wait.recv_timeout(timeout) {
            Ok(reply) => Ok(reply.body),
            Err(RecvTimeoutError::Timeout) => {
                lock(&self.pending).remove(&id);
                warn!("worker request {id} timed out after {timeout:?}");
                Err(EngineError::Timeout(timeout.as_millis() as u64))
            }
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}

impl Drop for WorkerClient {
    fn drop(&mut self) {
        // closing the request channel ends the worker, which ends the router
        self.tx.take();
        for t in self.threads.drain(..) { let _ = t.join(); }
    }
}
