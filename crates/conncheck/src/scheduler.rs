use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::metrics::Counters;
use crate::round::RoundAggregator;
use crate::tracker::{Transition, TransitionTracker};

/// Round scheduler - drives one round per interval, forever
pub struct Scheduler {
    aggregator: RoundAggregator,
    tracker: TransitionTracker,
    counters: Arc<Counters>,
    interval: Duration,
}

impl Scheduler {
    /// Create a new scheduler, `interval` must be non-zero
    pub fn new(
        aggregator: RoundAggregator,
        tracker: TransitionTracker,
        counters: Arc<Counters>,
        interval: Duration,
    ) -> Self {
        Self { aggregator, tracker, counters, interval }
    }

    pub fn tracker(&self) -> &TransitionTracker {
        &self.tracker
    }

    /// Run a single round and feed it to the tracker
    pub async fn step(&mut self) -> Transition {
        let result = self.aggregator.run().await;
        self.counters.set_num_visible(result.num_ok);
        self.tracker.observe(result)
    }

    /// Run rounds until the task is dropped. The first round starts
    /// immediately, missed ticks are skipped rather than replayed.
    pub async fn run(mut self) {
        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            timer.tick().await;
            self.step().await;
        }
    }
}
