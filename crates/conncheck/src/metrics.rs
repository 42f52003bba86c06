use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};

/// Process-wide counters read by the metrics endpoint
#[derive(Debug, Default)]
pub struct Counters {
    num_servers: AtomicI64,
    num_visible: AtomicI64,
}

/// Point-in-time copy of [`Counters`], serialized with expvar names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountersSnapshot {
    pub num_servers: i64,
    pub num_visible: i64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of configured servers, set once at startup
    pub fn set_num_servers(&self, value: usize) {
        self.num_servers.store(value as i64, Ordering::Relaxed);
    }

    /// Number of servers that answered in the latest round
    pub fn set_num_visible(&self, value: usize) {
        self.num_visible.store(value as i64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            num_servers: self.num_servers.load(Ordering::Relaxed),
            num_visible: self.num_visible.load(Ordering::Relaxed),
        }
    }
}
