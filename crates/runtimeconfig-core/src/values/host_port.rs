// ABOUTME: Host and port pair codec for network address configuration
// ABOUTME: Parses host:port with IPv6 bracket support and re-brackets hosts containing colons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigValue;
use crate::errors::{RuntimeConfigError, RuntimeConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network address split into host and port
///
/// The port is kept as a string so service names (`smtp`) survive unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostPort {
    /// Hostname or IP address, without brackets
    pub host: String,
    /// Port number or service name
    pub port: String,
}

impl HostPort {
    /// Create a host/port pair
    #[must_use]
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }

    /// Whether both parts are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.port.is_empty()
    }
}

fn split_host_port(addr: &str) -> Result<(&str, &str), &'static str> {
    if let Some(bracketed) = addr.strip_prefix('[') {
        let (host, after) = bracketed
            .split_once(']')
            .ok_or("missing ']' in address")?;
        let port = after.strip_prefix(':').ok_or("missing port in address")?;
        if host.contains(['[', ']']) || port.contains([':', '[', ']']) {
            return Err("unexpected bracket or colon in address");
        }
        return Ok((host, port));
    }

    let (host, port) = addr.rsplit_once(':').ok_or("missing port in address")?;
    if host.contains(':') {
        return Err("too many colons in address");
    }
    if host.contains(['[', ']']) || port.contains(['[', ']']) {
        return Err("unexpected bracket in address");
    }
    Ok((host, port))
}

impl ConfigValue for HostPort {
    fn type_name() -> &'static str {
        "host:port"
    }

    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        // The empty pair encodes to "", so "" must read back as the empty pair
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let (host, port) = split_host_port(raw)
            .map_err(|reason| RuntimeConfigError::invalid_value(Self::type_name(), raw, reason))?;
        Ok(Self::new(host, port))
    }

    fn encode(&self) -> String {
        if self.is_empty() {
            String::new()
        } else if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hostname() {
        let hp = HostPort::parse_value("localhost:1234").unwrap();
        assert_eq!(hp, HostPort::new("localhost", "1234"));
        assert_eq!(hp.to_string(), "localhost:1234");
    }

    #[test]
    fn test_parse_ipv6() {
        let hp = HostPort::parse_value("[::1]:587").unwrap();
        assert_eq!(hp.host, "::1");
        assert_eq!(hp.port, "587");
        assert_eq!(hp.encode(), "[::1]:587");
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["localhost", "::1:25", "[::1]25", "[::1:25", "a]:1"] {
            let err = HostPort::parse_value(raw).unwrap_err();
            assert!(err.is_invalid_value(), "{raw}");
        }
    }

    #[test]
    fn test_empty_round_trip() {
        let empty = HostPort::default();
        assert_eq!(empty.encode(), "");
        assert_eq!(HostPort::parse_value("").unwrap(), empty);
    }

    #[test]
    fn test_empty_port_is_kept() {
        let hp = HostPort::parse_value("smtp.example.com:").unwrap();
        assert_eq!(hp.port, "");
        assert_eq!(HostPort::parse_value(&hp.encode()).unwrap(), hp);
    }
}
