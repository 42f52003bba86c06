use chrono::{DateTime, Local, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::prober::Prober;

/// Outcome of one round of probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// Round start, in UTC
    pub utc: DateTime<Utc>,

    /// Round start, in local time (same instant as `utc`)
    pub local: DateTime<Local>,

    /// Targets that answered
    pub num_ok: usize,

    /// Targets that did not answer
    pub num_bad: usize,
}

impl RoundResult {
    /// Create a result for a round started at `local`
    pub fn new(local: DateTime<Local>, num_ok: usize, num_bad: usize) -> Self {
        Self { utc: local.with_timezone(&Utc), local, num_ok, num_bad }
    }

    /// A round is bad when at least half of the targets are unreachable
    pub fn is_bad(&self) -> bool {
        self.num_bad >= self.num_ok
    }

    pub fn total(&self) -> usize {
        self.num_ok + self.num_bad
    }
}

/// Round aggregator - probes every target concurrently and tallies verdicts
pub struct RoundAggregator {
    prober: Arc<dyn Prober>,
    targets: Arc<[SocketAddr]>,
}

impl RoundAggregator {
    /// Create a new aggregator over a fixed target list
    pub fn new(prober: Arc<dyn Prober>, targets: Vec<SocketAddr>) -> Self {
        Self { prober, targets: targets.into() }
    }

    pub fn targets(&self) -> &[SocketAddr] {
        &self.targets
    }

    /// Run one round and wait for every probe to report.
    ///
    /// A probe task that dies without reporting is counted as unreachable,
    /// so the result always covers every target exactly once.
    pub async fn run(&self) -> RoundResult {
        let started = Local::now();
        let (tx, mut rx) = mpsc::channel(self.targets.len().max(1));

        for &target in self.targets.iter() {
            let prober = self.prober.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let verdict = prober.probe(target).await;
                // Capacity covers every task, the send never waits
                let _ = tx.send(verdict).await;
            });
        }
        drop(tx);

        let mut num_ok = 0;
        while let Some(verdict) = rx.recv().await {
            if verdict {
                num_ok += 1;
            }
        }

        RoundResult::new(started, num_ok, self.targets.len() - num_ok)
    }
}
