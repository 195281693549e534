use std::collections::VecDeque;

pub const RECENT_CAPACITY: usize = 12;

/// Memory carried from one completed search to the next within a single
/// worker: the positions the engine recently moved into, and the most
/// recent one on its own.
///
/// Entries are position keys (FEN without move counters). The search only
/// reads the session; it is updated after a search completes.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    recent: VecDeque<String>,
    last_result: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self { Self::default() }

    pub fn record(&mut self, key: String) {
        if self.recent.len() >= RECENT_CAPACITY { self.recent.pop_front(); }
        self.recent.push_back(key.clone());
        self.last_result = Some(key);
    }

    pub fn is_recent(&self, key: &str) -> bool {
        self.recent.iter().any(|k| k == key)
    }

    pub fn last_result(&self) -> Option<&str> { self.last_result.as_deref() }

    pub fn recent_len(&self) -> usize { self.recent.len() }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.last_result = None;
    }
}
