//! Edge-triggered up/down tracking.
//!
//! The tracker only speaks when the aggregate verdict flips. Durations are
//! measured between two state-changing rounds; rounds that did not change
//! the state never move the reference point.

use chrono::{DateTime, Local};
use tracing::info;

use crate::round::RoundResult;

/// Time spent in the state that just ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSpan {
    /// Whole seconds, truncated
    pub seconds: i64,
    pub from: DateTime<Local>,
    pub to: DateTime<Local>,
}

impl StateSpan {
    fn between(last: &RoundResult, now: &RoundResult) -> Self {
        Self {
            seconds: (now.local - last.local).num_seconds(),
            from: last.local,
            to: now.local,
        }
    }
}

/// What a round did to the tracked state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Went down, `uptime` is how long it had been up
    Down { num_ok: usize, num_bad: usize, uptime: Option<StateSpan> },
    /// Came back up, `outage` is how long it had been down
    Up { num_ok: usize, num_bad: usize, outage: Option<StateSpan> },
    Unchanged { num_ok: usize, num_bad: usize },
}

impl Transition {
    pub fn is_change(&self) -> bool {
        !matches!(self, Transition::Unchanged { .. })
    }

    /// Duration of the previous state, if this round changed it and an
    /// earlier change exists to measure from
    pub fn span(&self) -> Option<&StateSpan> {
        match self {
            Transition::Down { uptime, .. } => uptime.as_ref(),
            Transition::Up { outage, .. } => outage.as_ref(),
            Transition::Unchanged { .. } => None,
        }
    }
}

/// Holds the current up/down belief and the last state-changing round
#[derive(Debug)]
pub struct TransitionTracker {
    up: bool,
    last_change: Option<RoundResult>,
    report_no_change: bool,
}

impl TransitionTracker {
    /// Starts in the up state with no recorded change
    pub fn new(report_no_change: bool) -> Self {
        Self { up: true, last_change: None, report_no_change }
    }

    pub fn is_up(&self) -> bool {
        self.up
    }

    pub fn last_change(&self) -> Option<&RoundResult> {
        self.last_change.as_ref()
    }

    /// Compare a new round against the current state, log and update
    pub fn observe(&mut self, now: RoundResult) -> Transition {
        let now_up = !now.is_bad();
        let (num_ok, num_bad) = (now.num_ok, now.num_bad);

        let transition = if now_up == self.up {
            if self.report_no_change {
                info!(num_ok, num_bad, "NOP {} good {} bad", num_ok, num_bad);
            }
            Transition::Unchanged { num_ok, num_bad }
        } else {
            let span = self.last_change.as_ref().map(|last| StateSpan::between(last, &now));
            self.last_change = Some(now);

            if now_up {
                info!(num_ok, num_bad, "UP {} good {} bad", num_ok, num_bad);
                if let Some(span) = &span {
                    info!(
                        seconds = span.seconds,
                        "Outage lasted {} seconds from {} to {}",
                        span.seconds,
                        span.from,
                        span.to
                    );
                }
                Transition::Up { num_ok, num_bad, outage: span }
            } else {
                info!(num_ok, num_bad, "DOWN {} good {} bad", num_ok, num_bad);
                if let Some(span) = &span {
                    info!(
                        seconds = span.seconds,
                        "Up for {} seconds from {} to {}",
                        span.seconds,
                        span.from,
                        span.to
                    );
                }
                Transition::Down { num_ok, num_bad, uptime: span }
            }
        };

        self.up = now_up;
        transition
    }
}
