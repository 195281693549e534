pub mod client;
pub mod engine_worker;
pub mod protocol;

pub use client::WorkerClient;
pub use engine_worker::{EngineWorker, WorkerState};
pub use protocol::{Command, GoParams, ReplyBody, WorkerReply, WorkerRequest};

use log::warn;
use std::io::{BufRead, Write};

/// Drive an [`EngineWorker`] over JSON lines: one request per input line,
/// one reply per output line. Blank lines are skipped. A line that is not
/// UTF-8 or not a request envelope gets an `error` reply with id 0 (or the
/// id, if one can be read from it) and the session carries on.
pub fn serve_lines<R: BufRead, W: Write>(mut input: R, mut output: W) -> std::io::Result<()> {
    let mut worker = EngineWorker::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 { break; }
        let reply = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(&mut worker, line.trim()),
            Err(e) => {
                warn!("request line is not UTF-8: {e}");
                bad_request(0, e)
            }
        };
        serde_json::to_writer(&mut output, &reply)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}

fn handle_line(worker: &mut EngineWorker, line: &str) -> WorkerReply {
    match serde_json::from_str::<WorkerRequest>(line) {
        Ok(req) => worker.handle(req),
        Err(e) => {
            warn!("unreadable request line: {e}");
            let id = serde_json::from_str::<serde_json::Value>(line).ok()
                .and_then(|v| v.get("id").and_then(|id| id.as_u64()))
                .unwrap_or(0);
            bad_request(id, e)
        }
    }
}

fn bad_request(id: u64, e: impl std::fmt::Display) -> WorkerReply {
    WorkerReply { id, body: ReplyBody::Error { error: format!("bad_request: {e}") } }
}
