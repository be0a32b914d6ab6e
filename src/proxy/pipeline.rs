//! A full validation run: read, probe, persist

use crate::proxy::aggregator::GoodProxySet;
use crate::proxy::checker::{CheckerConfig, Probe, ProxyChecker};
use crate::proxy::dispatcher::{Dispatcher, RunSummary};
use crate::proxy::parser::ProxyParser;
use crate::proxy::persister::save_good_proxies;
use crate::{Config, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Validate every proxy in `config.input` and write the good ones to `config.output`
pub async fn validate_file(config: &Config, checker: &CheckerConfig) -> Result<RunSummary> {
    let dispatcher = Dispatcher::new(ProxyChecker::with_config(checker), checker.targets.clone());
    validate_file_with(config, dispatcher).await
}

/// Same as [`validate_file`], with a caller-supplied dispatcher
pub async fn validate_file_with<P: Probe + 'static>(
    config: &Config,
    dispatcher: Dispatcher<P>,
) -> Result<RunSummary> {
    let parsed = ProxyParser::parse_file(&config.input)?;
    info!(
        proxies = parsed.records.len(),
        malformed = parsed.malformed.len(),
        targets = dispatcher.targets().len(),
        input = %config.input.display(),
        "Loaded proxy list"
    );

    let good = Arc::new(GoodProxySet::new());
    let mut summary = dispatcher.run(parsed.records, &good).await;
    summary.malformed_lines = parsed.malformed.len();

    summary.persisted = save_good_proxies(&good, &config.output)?;
    if summary.persisted != summary.good_proxies {
        warn!(
            persisted = summary.persisted,
            good = summary.good_proxies,
            "Persisted entry count differs from good proxy set"
        );
    }

    info!(
        proxies = summary.proxies,
        malformed = summary.malformed_lines,
        probes = summary.probes,
        successes = summary.successes,
        timeouts = summary.timeouts,
        failures = summary.failures,
        good = summary.good_proxies,
        persisted = summary.persisted,
        output = %config.output.display(),
        "All tests completed"
    );

    Ok(summary)
}
