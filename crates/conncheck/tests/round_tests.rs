//! Round aggregation tests with simulated probers

use conncheck::{Prober, RoundAggregator};
use rand::Rng;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Answers from a fixed outcome table after a random delay
struct SimulatedProber {
    outcomes: HashMap<SocketAddr, bool>,
    delays: HashMap<SocketAddr, Duration>,
}

impl SimulatedProber {
    fn new(outcomes: &[(SocketAddr, bool)]) -> Self {
        let mut rng = rand::thread_rng();
        let delays = outcomes
            .iter()
            .map(|(addr, _)| (*addr, Duration::from_millis(rng.gen_range(0..1500))))
            .collect();

        Self { outcomes: outcomes.iter().copied().collect(), delays }
    }
}

#[async_trait::async_trait]
impl Prober for SimulatedProber {
    async fn probe(&self, target: SocketAddr) -> bool {
        tokio::time::sleep(self.delays[&target]).await;
        self.outcomes[&target]
    }
}

fn target(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

#[tokio::test(start_paused = true)]
async fn test_counts_match_simulated_outcomes() {
    let _ = tracing_subscriber::fmt::try_init();

    let outcomes: Vec<(SocketAddr, bool)> =
        (1..=9).map(|port| (target(port), port % 3 != 0)).collect();
    let targets = outcomes.iter().map(|(addr, _)| *addr).collect();
    let aggregator = RoundAggregator::new(Arc::new(SimulatedProber::new(&outcomes)), targets);

    for _ in 0..5 {
        let result = aggregator.run().await;
        assert_eq!(result.num_ok, 6);
        assert_eq!(result.num_bad, 3);
        assert_eq!(result.total(), aggregator.targets().len());
        assert!(!result.is_bad());
    }
}

#[tokio::test(start_paused = true)]
async fn test_even_split_round_is_bad() {
    let outcomes = [(target(1), true), (target(2), true), (target(3), false), (target(4), false)];
    let targets = outcomes.iter().map(|(addr, _)| *addr).collect();
    let aggregator = RoundAggregator::new(Arc::new(SimulatedProber::new(&outcomes)), targets);

    let result = aggregator.run().await;
    assert_eq!((result.num_ok, result.num_bad), (2, 2));
    assert!(result.is_bad());
}

#[tokio::test(start_paused = true)]
async fn test_round_waits_for_slowest_probe() {
    let outcomes = [(target(1), true), (target(2), false)];
    let prober = SimulatedProber {
        outcomes: outcomes.iter().copied().collect(),
        delays: [(target(1), Duration::ZERO), (target(2), Duration::from_secs(2))]
            .into_iter()
            .collect(),
    };
    let aggregator =
        RoundAggregator::new(Arc::new(prober), outcomes.iter().map(|(a, _)| *a).collect());

    let start = tokio::time::Instant::now();
    let result = aggregator.run().await;

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_millis(2100));
    assert_eq!(result.total(), 2);
}
