// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Server configuration, read from `IMPRINT_*` environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ImprintError, Result};

/// Environment variable holding the listen address.
pub const ENV_HOST: &str = "IMPRINT_HOST";
/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "IMPRINT_PORT";
/// Environment variable holding the upload size limit in bytes.
pub const ENV_MAX_UPLOAD_BYTES: &str = "IMPRINT_MAX_UPLOAD_BYTES";

/// Settings for the HTTP server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (default 0.0.0.0).
    pub host: IpAddr,
    /// Port to bind (default 8080).
    pub port: u16,
    /// Request body limit in bytes. `None` keeps the framework default.
    pub max_upload_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            max_upload_bytes: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_HOST) {
            config.host = parse_var(ENV_HOST, &host)?;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = parse_var(ENV_PORT, &port)?;
        }
        if let Some(limit) = lookup(ENV_MAX_UPLOAD_BYTES) {
            let limit: usize = parse_var(ENV_MAX_UPLOAD_BYTES, &limit)?;
            if limit == 0 {
                return Err(ImprintError::Config(format!(
                    "{ENV_MAX_UPLOAD_BYTES} must be greater than zero"
                )));
            }
            config.max_upload_bytes = Some(limit);
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| ImprintError::Config(format!("{key}={raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (ENV_HOST, "127.0.0.1"),
            (ENV_PORT, " 9000 "),
            (ENV_MAX_UPLOAD_BYTES, "1048576"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.max_upload_bytes, Some(1_048_576));
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[(ENV_PORT, "http")])).unwrap_err();
        assert!(matches!(err, ImprintError::Config(_)));
        assert!(err.to_string().contains(ENV_PORT));
    }

    #[test]
    fn rejects_zero_upload_limit() {
        let err =
            ServerConfig::from_lookup(lookup_from(&[(ENV_MAX_UPLOAD_BYTES, "0")])).unwrap_err();
        assert!(matches!(err, ImprintError::Config(_)));
    }
}
