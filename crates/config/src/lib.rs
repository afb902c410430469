//! Configuration loading for bookshelf.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults,
//! 2. a TOML file (an explicit path, or `bookshelf.toml` in the working
//!    directory if it exists),
//! 3. environment variables prefixed with `BOOKSHELF_`, e.g.
//!    `BOOKSHELF_DATABASE_URL=sqlite://books.db`.
//!
//! `database_url` has no default; a process without one refuses to start.

pub mod error;

use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "BOOKSHELF_";
pub const DEFAULT_FILE: &str = "bookshelf.toml";
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite connection string for the catalog, e.g. `sqlite://books.db`.
    pub database_url: String,
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

/// Everything that has a default. Kept separate from [`Config`] so that a
/// missing `database_url` is reported instead of silently defaulted.
#[derive(Serialize)]
struct Defaults {
    bind: SocketAddr,
    max_upload_bytes: usize,
}
impl Default for Defaults {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// The layered configuration sources, without extracting anything.
    pub fn figment(file: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Defaults::default()));
        let figment = match file {
            Some(path) => figment.merge(Toml::file_exact(path)),
            None => figment.merge(Toml::file(DEFAULT_FILE)),
        };
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate the configuration.
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_figment(&Self::figment(file))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = match figment.extract() {
            Ok(config) => config,
            Err(err) if err.missing() => exn::bail!(ErrorKind::MissingDatabaseUrl),
            Err(err) => return Err(err).or_raise(|| ErrorKind::Invalid),
        };
        if config.database_url.trim().is_empty() {
            exn::bail!(ErrorKind::MissingDatabaseUrl);
        }
        tracing::debug!(bind = %config.bind, max_upload_bytes = config.max_upload_bytes, "Loaded configuration");
        Ok(config)
    }
}
