use std::io::Error as IoError;

use conncheck::ResolveError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to resolve servers: {0}")]
    Resolve(#[from] ResolveError),
}
