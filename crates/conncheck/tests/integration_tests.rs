//! Integration tests for conncheck
//!
//! These tests run real probes against local UDP responders and feed the
//! rounds through the transition tracker.

use chrono::Duration as ChronoDuration;
use conncheck::{
    Counters, RoundAggregator, RoundResult, Scheduler, StunProber, Transition, TransitionTracker,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::net::UdpSocket;

/// UDP responder that answers only while `online` is set
struct Responder {
    addr: SocketAddr,
    online: Arc<AtomicBool>,
}

impl Responder {
    async fn spawn() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let online = Arc::new(AtomicBool::new(true));

        let flag = online.clone();
        tokio::spawn(async move {
            let mut buf = [0u8; 1500];
            while let Ok((_, peer)) = socket.recv_from(&mut buf).await {
                if flag.load(Ordering::SeqCst) {
                    let _ = socket.send_to(b"binding success", peer).await;
                }
            }
        });

        Self { addr, online }
    }

    fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

async fn responders(n: usize) -> Vec<Responder> {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(Responder::spawn().await);
    }
    out
}

fn aggregator(responders: &[Responder]) -> RoundAggregator {
    let prober = StunProber::new(Duration::from_millis(300));
    RoundAggregator::new(Arc::new(prober), responders.iter().map(|r| r.addr).collect())
}

#[tokio::test]
async fn test_outage_and_recovery() {
    let _ = tracing_subscriber::fmt::try_init();

    let servers = responders(3).await;
    let aggregator = aggregator(&servers);
    let mut tracker = TransitionTracker::new(false);

    // Round 1: everything answers, still up
    let round1 = aggregator.run().await;
    assert_eq!((round1.num_ok, round1.num_bad), (3, 0));
    assert!(!tracker.observe(round1).is_change());
    assert!(tracker.is_up());

    // Round 2: nothing answers, first change has no duration
    servers.iter().for_each(|s| s.set_online(false));
    let round2 = aggregator.run().await;
    let transition = tracker.observe(round2);
    assert_eq!(transition, Transition::Down { num_ok: 0, num_bad: 3, uptime: None });
    assert_eq!(tracker.last_change(), Some(&round2));

    // Round 3, ten seconds after round 2: back up with the outage length
    servers.iter().for_each(|s| s.set_online(true));
    let measured = aggregator.run().await;
    let round3 = RoundResult::new(
        round2.local + ChronoDuration::seconds(10),
        measured.num_ok,
        measured.num_bad,
    );
    match tracker.observe(round3) {
        Transition::Up { num_ok: 3, num_bad: 0, outage: Some(span) } => {
            assert_eq!(span.seconds, 10);
            assert_eq!(span.from, round2.local);
            assert_eq!(span.to, round3.local);
        }
        other => panic!("expected recovery, got {:?}", other),
    }
    assert!(tracker.is_up());
}

#[tokio::test]
async fn test_silent_targets_bound_round_latency() {
    let servers = responders(2).await;
    servers[0].set_online(false);
    let aggregator = aggregator(&servers);

    let start = std::time::Instant::now();
    let result = aggregator.run().await;

    assert_eq!((result.num_ok, result.num_bad), (1, 1));
    assert!(result.is_bad());
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_scheduler_steps_over_real_probes() {
    let servers = responders(3).await;
    servers[0].set_online(false);
    let counters = Arc::new(Counters::new());
    counters.set_num_servers(servers.len());

    let mut scheduler = Scheduler::new(
        aggregator(&servers),
        TransitionTracker::new(true),
        counters.clone(),
        Duration::from_secs(60),
    );

    let transition = scheduler.step().await;
    assert_eq!(transition, Transition::Unchanged { num_ok: 2, num_bad: 1 });

    let snapshot = counters.snapshot();
    assert_eq!(snapshot.num_servers, 3);
    assert_eq!(snapshot.num_visible, 2);
}
