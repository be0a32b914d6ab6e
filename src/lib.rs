//! Proxy Sieve - Concurrent Proxy Validator
//!
//! Reads a proxy list, probes every proxy against a fixed set of reachability
//! targets at once and keeps the proxies that answered at least one probe.

pub mod logging;
pub mod proxy;

pub use proxy::*;

use std::path::PathBuf;

/// Application result type
pub type Result<T> = anyhow::Result<T>;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Proxy list, one proxy per line
    pub input: PathBuf,
    /// Destination for the good proxies, overwritten on every run
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("proxy.txt"),
            output: PathBuf::from("good_proxy.txt"),
        }
    }
}
