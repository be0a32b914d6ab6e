//! Proxy module for parsing and validating proxies
//!
//! This module provides functionality for:
//! - Parsing proxies from `HOST:PORT` and `HOST:PORT:USER:PASS` lines
//! - Probing every proxy against a fixed set of targets concurrently
//! - Saving the proxies that answered at least once
//! - Reformatting credentialed proxy lines into URLs

pub mod aggregator;
pub mod checker;
pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod models;
pub mod parser;
pub mod persister;
pub mod pipeline;

pub use aggregator::GoodProxySet;
pub use checker::{CheckerConfig, Probe, ProxyChecker, DEFAULT_TARGETS};
pub use dispatcher::{Dispatcher, RunSummary};
pub use error::ProxyParseError;
pub use formatter::{format_file, format_line, FormatStyle};
pub use models::{ProbeOutcome, ProxyAuth, ProxyRecord, ProxyType};
pub use parser::{ParsedProxies, ProxyParser};
pub use persister::save_good_proxies;
pub use pipeline::{validate_file, validate_file_with};
