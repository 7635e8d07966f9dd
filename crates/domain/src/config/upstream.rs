use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub target: UpstreamTarget,

    /// Bound on each stage of the upstream exchange (connect, handshake,
    /// write, read), in seconds.
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_upstream_timeout() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECS
}

/// DNS-over-TLS server given as `host:port`.
///
/// `host` is either an IP literal or a hostname; it doubles as the TLS server
/// name the certificate is verified against. IPv6 literals use the bracketed
/// `[addr]:port` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct UpstreamTarget {
    host: Arc<str>,
    port: u16,
}

impl UpstreamTarget {
    pub fn new(host: impl Into<Arc<str>>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl FromStr for UpstreamTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected host:port, got \"{}\"", s))?;

        let host = match host.strip_prefix('[') {
            Some(inner) => inner
                .strip_suffix(']')
                .ok_or_else(|| format!("unterminated IPv6 literal in \"{}\"", s))?,
            None if host.contains(':') => {
                return Err(format!("IPv6 address must be bracketed in \"{}\"", s));
            }
            None => host,
        };

        if host.is_empty() {
            return Err(format!("missing host in \"{}\"", s));
        }

        let port: u16 = port
            .parse()
            .map_err(|e| format!("invalid port in \"{}\": {}", s, e))?;
        if port == 0 {
            return Err(format!("port cannot be 0 in \"{}\"", s));
        }

        Ok(Self::new(host, port))
    }
}

impl TryFrom<String> for UpstreamTarget {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UpstreamTarget> for String {
    fn from(target: UpstreamTarget) -> Self {
        target.to_string()
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
