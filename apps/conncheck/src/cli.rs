use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Command line flags; anything given here overrides the config file
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Watch connectivity by probing public STUN servers")]
pub struct Args {
    /// Delay between rounds, in seconds
    #[arg(long)]
    pub delay_sec: Option<u64>,

    /// Log rounds that did not change the state
    #[arg(long)]
    pub print_no_change: bool,

    /// Port to export counters on, 0 disables the endpoint
    #[arg(long)]
    pub port: Option<u16>,

    /// Keep retrying DNS until all lookups succeed
    #[arg(long, action = ArgAction::Set)]
    pub retry_dns_forever: Option<bool>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
