use std::{env, fmt, fs, io, path, time::Duration};

use conncheck::{DEFAULT_DELAY_SECS, default_servers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    ParseFailed {
        path: path::PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("delay_sec must be greater than zero")]
    ZeroDelay,
    #[error("no servers configured")]
    NoServers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between rounds, also used between DNS retries
    pub delay_sec: u64,
    pub print_no_change: bool,
    /// Metrics port, 0 disables the endpoint
    pub port: u16,
    pub retry_dns_forever: bool,
    /// `host:port` of every server to probe
    pub servers: Vec<String>,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/conncheck/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Option<path::PathBuf> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else {
        env::home_dir()?.join(".config")
    };

    Some(path.join("conncheck/config.toml"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay_sec: DEFAULT_DELAY_SECS,
            print_no_change: false,
            port: 0,
            retry_dns_forever: true,
            servers: default_servers(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let write_2 = write_indented(2);

        writeln!(f, "Current Configuration State:")?;
        write_title_1(f, "Rounds")?;
        write_1(f, "Delay (s)", &self.delay_sec)?;
        write_1(f, "Print No Change", &self.print_no_change)?;
        write_1(f, "Retry DNS Forever", &self.retry_dns_forever)?;
        write_title_1(f, "Metrics")?;
        match self.metrics_port() {
            Some(port) => write_1(f, "Port", &port)?,
            None => write_1(f, "Port", &"disabled")?,
        }
        write_title_1(f, "Servers")?;
        for (i, server) in self.servers.iter().enumerate() {
            write_2(f, &i.to_string(), server)?;
        }

        Ok(())
    }
}

impl Config {
    /// Load the config from a TOML file
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        let config_path = match optional_path {
            Some(path) => normalize_toml_path(path.as_ref()),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let raw_string = fs::read_to_string(&config_path)
            .map_err(|source| ConfigError::ReadFailed { path: config_path.clone(), source })?;
        toml::from_str(raw_string.as_str())
            .map_err(|source| ConfigError::ParseFailed { path: config_path, source })
    }

    /// Override file values with the flags given on the command line
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(delay_sec) = args.delay_sec {
            self.delay_sec = delay_sec;
        }
        if args.print_no_change {
            self.print_no_change = true;
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(retry_dns_forever) = args.retry_dns_forever {
            self.retry_dns_forever = retry_dns_forever;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_sec == 0 {
            return Err(ConfigError::ZeroDelay);
        }
        if self.servers.is_empty() {
            return Err(ConfigError::NoServers);
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_sec)
    }

    pub fn metrics_port(&self) -> Option<u16> {
        (self.port > 0).then_some(self.port)
    }
}
