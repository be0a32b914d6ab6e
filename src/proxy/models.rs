//! Proxy data models

use std::fmt;
use std::str::FromStr;

/// Proxy scheme used when building the connection address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyType {
    #[default]
    Http,
    Https,
    Socks5,
}

impl ProxyType {
    /// Every scheme the probe transport can build a client for
    pub const ALL: [ProxyType; 3] = [ProxyType::Http, ProxyType::Https, ProxyType::Socks5];
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyType::Http => write!(f, "http"),
            ProxyType::Https => write!(f, "https"),
            ProxyType::Socks5 => write!(f, "socks5"),
        }
    }
}

impl FromStr for ProxyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(ProxyType::Http),
            "https" => Ok(ProxyType::Https),
            "socks5" => Ok(ProxyType::Socks5),
            _ => Err(anyhow::anyhow!(
                "Invalid proxy type: {}. Use: http, https, socks5",
                s
            )),
        }
    }
}

/// Proxy authentication credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyAuth {
    pub username: String,
    pub password: String,
}

impl ProxyAuth {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

/// A validated proxy line.
///
/// Only [`crate::proxy::ProxyParser`] builds these, so a record always has a
/// host, a numeric port and either both credentials or none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRecord {
    raw_line: String,
    pub host: String,
    pub port: u16,
    pub auth: Option<ProxyAuth>,
}

impl ProxyRecord {
    pub(crate) fn new(raw_line: String, host: String, port: u16, auth: Option<ProxyAuth>) -> Self {
        Self {
            raw_line,
            host,
            port,
            auth,
        }
    }

    /// The line this record was parsed from; used as its identity in the good set
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Get the proxy URL string for the given scheme
    pub fn url(&self, scheme: ProxyType) -> String {
        let auth_part = self.auth.as_ref().map_or(String::new(), |auth| {
            format!("{}:{}@", auth.username, auth.password)
        });

        format!("{}://{}{}:{}", scheme, auth_part, self.host, self.port)
    }
}

impl fmt::Display for ProxyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_line)
    }
}

/// Outcome of one probe: one proxy against one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A response came back, whatever its status code
    Success { duration_ms: u64 },
    Timeout,
    Failure { cause: String },
    /// The proxy address could not be turned into a transport
    MalformedProxy,
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// Short name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeOutcome::Success { .. } => "success",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::Failure { .. } => "failure",
            ProbeOutcome::MalformedProxy => "malformed_proxy",
        }
    }
}
