//! Fan-out of one probe task per (proxy, target) pair

use crate::proxy::aggregator::GoodProxySet;
use crate::proxy::checker::Probe;
use crate::proxy::models::{ProbeOutcome, ProxyRecord};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error};

/// Counts gathered over one dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub proxies: usize,
    pub malformed_lines: usize,
    pub probes: usize,
    pub successes: usize,
    pub timeouts: usize,
    pub failures: usize,
    pub good_proxies: usize,
    /// Lines written by the persister; equals `good_proxies` after a full run
    pub persisted: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Success { .. } => self.successes += 1,
            ProbeOutcome::Timeout => self.timeouts += 1,
            ProbeOutcome::Failure { .. } | ProbeOutcome::MalformedProxy => self.failures += 1,
        }
    }
}

/// Launches every probe at once and waits for all of them.
///
/// There is no concurrency cap and no short-circuiting: each proxy is probed
/// against every target.
pub struct Dispatcher<P> {
    prober: Arc<P>,
    targets: Arc<[String]>,
}

impl<P: Probe + 'static> Dispatcher<P> {
    pub fn new(prober: P, targets: Vec<String>) -> Self {
        Self {
            prober: Arc::new(prober),
            targets: targets.into(),
        }
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Probe every proxy against every target, recording successes in `good`.
    ///
    /// Returns only after every spawned task has finished.
    pub async fn run(&self, proxies: Vec<ProxyRecord>, good: &Arc<GoodProxySet>) -> RunSummary {
        let mut summary = RunSummary {
            proxies: proxies.len(),
            ..Default::default()
        };

        let mut handles = Vec::with_capacity(proxies.len() * self.targets.len());
        for proxy in proxies.into_iter().map(Arc::new) {
            for target_index in 0..self.targets.len() {
                let prober = Arc::clone(&self.prober);
                let targets = Arc::clone(&self.targets);
                let proxy = Arc::clone(&proxy);
                let good = Arc::clone(good);

                handles.push(tokio::spawn(async move {
                    let target = &targets[target_index];
                    let outcome = prober.probe(&proxy, target).await;
                    debug!(proxy = %proxy, target_url = %target, outcome = outcome.kind(), "Probe finished");
                    if outcome.is_success() {
                        good.record_success(proxy.raw_line());
                    }
                    outcome
                }));
            }
        }

        summary.probes = handles.len();
        debug!(probes = summary.probes, "Dispatched probes");

        for result in join_all(handles).await {
            match result {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => {
                    error!(error = %e, "Probe task did not complete");
                    summary.failures += 1;
                }
            }
        }

        summary.good_proxies = good.len();
        summary
    }
}
