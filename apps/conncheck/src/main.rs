#![warn(clippy::all, clippy::pedantic)]

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use conncheck::{
    Counters, DnsResolver, RetryPolicy, RoundAggregator, Scheduler, StunProber, TransitionTracker,
    resolve_targets,
};
use tracing::{debug, error, info};

mod cli;
mod config;
mod error;
mod routes;
mod server;

use cli::Args;
use config::Config;
use error::AppError;
use logger::init_tracing;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    run(Args::parse()).await.inspect_err(|e| error!("{e}"))
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::from_config(args.config.as_ref())?;
    config.apply_args(&args);
    config.validate()?;
    debug!("{}", config);

    let counters = Arc::new(Counters::new());
    counters.set_num_servers(config.servers.len());

    // Up before resolution so collectors see the counters while DNS retries
    let Some(port) = config.metrics_port() else {
        return monitor(&config, counters).await;
    };
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let server = server::metrics_server(addr, counters.clone())?;

    tokio::select! {
        result = server => {
            result?;
            info!("Metrics server stopped, shutting down");
            Ok(())
        }
        result = monitor(&config, counters) => result,
    }
}

/// Resolve the servers, then probe them forever
async fn monitor(config: &Config, counters: Arc<Counters>) -> Result<(), AppError> {
    let policy = RetryPolicy::from_retry_forever(config.retry_dns_forever);
    let targets = resolve_targets(&DnsResolver, &config.servers, policy, config.delay()).await?;

    let aggregator = RoundAggregator::new(Arc::new(StunProber::default()), targets);
    let tracker = TransitionTracker::new(config.print_no_change);
    Scheduler::new(aggregator, tracker, counters, config.delay()).run().await;

    Ok(())
}
