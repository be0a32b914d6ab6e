//! Proxy checker module: a single probe of one target through one proxy

use crate::proxy::models::{ProbeOutcome, ProxyRecord, ProxyType};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, Proxy as ReqwestProxy};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Default timeout for a single probe in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Reachability targets every proxy is probed against
pub const DEFAULT_TARGETS: &[&str] = &["https://www.youtube.com", "https://www.google.com"];

/// Configuration for proxy checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Hard timeout for each probe
    pub timeout: Duration,
    /// URLs every proxy is probed against
    pub targets: Vec<String>,
    /// Scheme used to reach the proxy
    pub proxy_type: ProxyType,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            targets: DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
            proxy_type: ProxyType::Http,
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_proxy_type(mut self, proxy_type: ProxyType) -> Self {
        self.proxy_type = proxy_type;
        self
    }
}

/// One attempt to reach one target through one proxy.
///
/// Implementations only compute the outcome; recording it is up to the caller.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, proxy: &ProxyRecord, target: &str) -> ProbeOutcome;
}

/// Probe executor backed by reqwest
#[derive(Debug, Clone)]
pub struct ProxyChecker {
    timeout: Duration,
    proxy_type: ProxyType,
}

impl ProxyChecker {
    pub fn new(timeout: Duration, proxy_type: ProxyType) -> Self {
        Self {
            timeout,
            proxy_type,
        }
    }

    pub fn with_config(config: &CheckerConfig) -> Self {
        Self::new(config.timeout, config.proxy_type)
    }

    /// Create a reqwest client that tunnels everything through the proxy
    fn create_client(&self, proxy: &ProxyRecord) -> Result<Client> {
        let reqwest_proxy = ReqwestProxy::all(proxy.url(self.proxy_type))?;

        let client = Client::builder()
            .proxy(reqwest_proxy)
            .timeout(self.timeout)
            .build()?;

        Ok(client)
    }

    async fn send(&self, client: &Client, target: &str) -> ProbeOutcome {
        let start = Instant::now();

        // reqwest's own timeout normally fires first
        match tokio::time::timeout(self.timeout, client.get(target).send()).await {
            Ok(Ok(response)) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                drop(response);
                ProbeOutcome::Success { duration_ms }
            }
            Ok(Err(e)) if e.is_timeout() => ProbeOutcome::Timeout,
            Ok(Err(e)) => ProbeOutcome::Failure {
                cause: error_chain(&e),
            },
            Err(_) => ProbeOutcome::Timeout,
        }
    }
}

#[async_trait]
impl Probe for ProxyChecker {
    async fn probe(&self, proxy: &ProxyRecord, target: &str) -> ProbeOutcome {
        let outcome = match self.create_client(proxy) {
            Ok(client) => self.send(&client, target).await,
            Err(e) => {
                error!(proxy = %proxy, error = %e, "Error building proxy transport");
                return ProbeOutcome::MalformedProxy;
            }
        };

        match &outcome {
            ProbeOutcome::Success { duration_ms } => {
                info!(proxy = %proxy, target_url = target, duration_ms, "Proxy succeeded")
            }
            ProbeOutcome::Timeout => {
                warn!(proxy = %proxy, target_url = target, "Proxy timed out, skipping")
            }
            ProbeOutcome::Failure { cause } => {
                error!(proxy = %proxy, target_url = target, error = %cause, "Proxy failed")
            }
            ProbeOutcome::MalformedProxy => {}
        }

        outcome
    }
}

/// Flatten an error and its sources into one line
fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
