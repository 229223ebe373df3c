//! Configuration from the environment
//!
//! Unset or empty variables fall back to the defaults

use std::net::IpAddr;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8443";
const DEFAULT_HTTP_PORT: &str = "8080";
const DEFAULT_CERT_FILE: &str = "./certs/wildcard.crt";
const DEFAULT_KEY_FILE: &str = "./certs/wildcard.key";
const DEFAULT_STATIC_DIR: &str = "./static";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the database file
    pub data_dir: PathBuf,

    /// IP address both listeners bind to
    pub address: IpAddr,

    /// Port of the secured listener
    pub port: u16,

    /// Port of the plain listener
    ///
    /// Redirects to the secured listener, or serves the app itself when TLS is disabled
    pub http_port: u16,

    /// PEM certificate chain
    pub cert_file: PathBuf,

    /// PEM private key
    pub key_file: PathBuf,

    /// Directory with the browser client
    pub static_dir: PathBuf,

    /// Serve over TLS
    pub tls: bool,
}

impl Config {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration using `lookup` to get the variables
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let address = var("ADDRESS", DEFAULT_ADDRESS);
        let port = var("PORT", DEFAULT_PORT);
        let http_port = var("HTTP_PORT", DEFAULT_HTTP_PORT);
        let tls = var("TLS", "true");

        Ok(Self {
            data_dir: var("DATA_DIR", DEFAULT_DATA_DIR).into(),
            address: address
                .parse()
                .with_context(|| format!("Invalid ADDRESS: {address}"))?,
            port: port
                .parse()
                .with_context(|| format!("Invalid PORT: {port}"))?,
            http_port: http_port
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT: {http_port}"))?,
            cert_file: var("CERT_FILE", DEFAULT_CERT_FILE).into(),
            key_file: var("KEY_FILE", DEFAULT_KEY_FILE).into(),
            static_dir: var("STATIC_DIR", DEFAULT_STATIC_DIR).into(),
            tls: parse_flag(&tls).with_context(|| format!("Invalid TLS: {tls}"))?,
        })
    }

    /// Address of the secured listener
    pub fn secure_address(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// Address of the plain listener
    pub fn plain_address(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.http_port)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("expected true or false"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars = vars
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();

        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.port, 8443);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.cert_file, PathBuf::from("./certs/wildcard.crt"));
        assert_eq!(config.key_file, PathBuf::from("./certs/wildcard.key"));
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert!(config.tls);

        assert_eq!(config.secure_address().to_string(), "0.0.0.0:8443");
        assert_eq!(config.plain_address().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_vars() {
        let config = config_from(&[
            ("DATA_DIR", "/test/data"),
            ("ADDRESS", "127.0.0.1"),
            ("PORT", "9443"),
            ("HTTP_PORT", "9090"),
            ("CERT_FILE", "/test/cert.crt"),
            ("KEY_FILE", "/test/key.key"),
            ("STATIC_DIR", "/test/static"),
            ("TLS", "off"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/test/data"));
        assert_eq!(config.port, 9443);
        assert_eq!(config.http_port, 9090);
        assert_eq!(config.cert_file, PathBuf::from("/test/cert.crt"));
        assert_eq!(config.key_file, PathBuf::from("/test/key.key"));
        assert_eq!(config.static_dir, PathBuf::from("/test/static"));
        assert!(!config.tls);

        assert_eq!(config.secure_address().to_string(), "127.0.0.1:9443");
        assert_eq!(config.plain_address().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_empty_falls_back_to_default() {
        let config = config_from(&[("PORT", ""), ("DATA_DIR", "")]).unwrap();

        assert_eq!(config.port, 8443);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("PORT", "https")]).is_err());
        assert!(config_from(&[("HTTP_PORT", "70000")]).is_err());
        assert!(config_from(&[("ADDRESS", "localhost")]).is_err());
        assert!(config_from(&[("TLS", "maybe")]).is_err());
    }
}
