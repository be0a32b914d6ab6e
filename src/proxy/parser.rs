//! Proxy parser module for turning proxy lines into records

use crate::proxy::error::ProxyParseError;
use crate::proxy::models::{ProxyAuth, ProxyRecord};
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Records parsed from a list, together with the lines that were rejected
#[derive(Debug, Default)]
pub struct ParsedProxies {
    pub records: Vec<ProxyRecord>,
    pub malformed: Vec<ProxyParseError>,
}

/// Proxy parser for parsing proxies from strings and files
pub struct ProxyParser;

impl ProxyParser {
    /// Parse a single proxy line
    ///
    /// Supports formats:
    /// - HOST:PORT
    /// - HOST:PORT:USER:PASS
    pub fn parse_line(line: &str) -> std::result::Result<ProxyRecord, ProxyParseError> {
        let line = line.trim();
        let parts: Vec<&str> = line.split(':').collect();

        let (host, port, auth) = match parts.as_slice() {
            [host, port] => (*host, *port, None),
            [host, port, user, pass] => {
                if user.is_empty() {
                    return Err(Self::empty(line, "username"));
                }
                if pass.is_empty() {
                    return Err(Self::empty(line, "password"));
                }
                let auth = ProxyAuth::new(user.to_string(), pass.to_string());
                (*host, *port, Some(auth))
            }
            _ => {
                return Err(ProxyParseError::FieldCount {
                    line: line.to_string(),
                    found: parts.len(),
                })
            }
        };

        if host.is_empty() {
            return Err(Self::empty(line, "host"));
        }
        let port: u16 = port.parse().map_err(|_| ProxyParseError::InvalidPort {
            line: line.to_string(),
            port: port.to_string(),
        })?;

        Ok(ProxyRecord::new(line.to_string(), host.to_string(), port, auth))
    }

    fn empty(line: &str, field: &'static str) -> ProxyParseError {
        ProxyParseError::EmptyField {
            line: line.to_string(),
            field,
        }
    }

    /// Parse proxies from a string (multiple lines).
    ///
    /// Blank lines are skipped; every other rejected line is logged and kept
    /// in [`ParsedProxies::malformed`].
    pub fn parse_string(content: &str) -> ParsedProxies {
        let mut parsed = ParsedProxies::default();

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match Self::parse_line(line) {
                Ok(record) => parsed.records.push(record),
                Err(e) => {
                    warn!(line = e.line(), error = %e, "Skipping malformed proxy line");
                    parsed.malformed.push(e);
                }
            }
        }

        parsed
    }

    /// Parse proxies from a file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedProxies> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Error opening proxy file {}", path.display()))?;
        Ok(Self::parse_string(&content))
    }
}
