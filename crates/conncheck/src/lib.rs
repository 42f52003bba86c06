//! Conncheck - connectivity monitoring over public STUN servers
//!
//! This library probes a fixed set of UDP servers with a STUN binding
//! request, folds the per-server verdicts of each round into an up/down
//! verdict and reports transitions between the two.

pub mod metrics;
pub mod packet;
pub mod prober;
pub mod resolver;
pub mod round;
pub mod scheduler;
pub mod tracker;

// Re-export main types
pub use metrics::{Counters, CountersSnapshot};
pub use prober::{Prober, StunProber};
pub use resolver::{DnsResolver, Resolve, ResolveError, RetryPolicy, resolve_targets};
pub use round::{RoundAggregator, RoundResult};
pub use scheduler::Scheduler;
pub use tracker::{StateSpan, Transition, TransitionTracker};

use std::time::Duration;

/// Deadline shared by the send and the receive of a single probe
pub const DEFAULT_PROBE_DEADLINE: Duration = Duration::from_secs(2);

/// Default delay between two rounds, in seconds
pub const DEFAULT_DELAY_SECS: u64 = 60;

/// Public STUN servers probed when no other list is configured
pub const DEFAULT_SERVERS: &[&str] = &[
    "stun.l.google.com:19302",
    "stun.ekiga.net:3478",
    "stunserver.org:3478",
    "stun.xten.com:3478",
    "stun.softjoys.com:3478",
    "stun.voxgratia.org:3478",
    "stun1.noc.ams-ix.net:3478",
];

/// Owned copy of [`DEFAULT_SERVERS`]
pub fn default_servers() -> Vec<String> {
    DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect()
}
