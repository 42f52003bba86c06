use anyhow::{Result, anyhow};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use crate::DEFAULT_PROBE_DEADLINE;
use crate::packet::{BINDING_REQUEST, RESPONSE_BUFFER_LEN};

/// Prober trait for single-target reachability checks
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Probe one target once and return whether it answered
    async fn probe(&self, target: SocketAddr) -> bool;
}

/// UDP prober sending a STUN binding request
#[derive(Debug, Clone)]
pub struct StunProber {
    deadline: Duration,
}

impl StunProber {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// One send/receive exchange, returns the number of bytes received.
    ///
    /// The deadline is fixed when the exchange starts and bounds the send
    /// and the receive together.
    async fn attempt(&self, target: SocketAddr) -> Result<usize> {
        let deadline = Instant::now() + self.deadline;

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| anyhow!("UDP bind failed: {}", e))?;
        socket
            .connect(target)
            .await
            .map_err(|e| anyhow!("UDP connect failed: {}", e))?;

        let sent = timeout_at(deadline, socket.send(&BINDING_REQUEST))
            .await
            .map_err(|_| anyhow!("send timeout"))?
            .map_err(|e| anyhow!("send failed: {}", e))?;
        if sent != BINDING_REQUEST.len() {
            return Err(anyhow!("partial write: {} of {} bytes", sent, BINDING_REQUEST.len()));
        }

        let mut buf = [0u8; RESPONSE_BUFFER_LEN];
        let received = timeout_at(deadline, socket.recv(&mut buf))
            .await
            .map_err(|_| anyhow!("receive timeout"))?
            .map_err(|e| anyhow!("receive failed: {}", e))?;
        if received == 0 {
            return Err(anyhow!("empty response"));
        }

        Ok(received)
    }
}

impl Default for StunProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_DEADLINE)
    }
}

#[async_trait::async_trait]
impl Prober for StunProber {
    async fn probe(&self, target: SocketAddr) -> bool {
        match self.attempt(target).await {
            Ok(received) => {
                debug!(%target, received, "probe answered");
                true
            }
            Err(e) => {
                debug!(%target, "probe failed: {}", e);
                false
            }
        }
    }
}
