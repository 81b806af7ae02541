//! Startup configuration.
//!
//! Command-line flags win over environment variables, which win over the
//! built-in defaults. [`AppConfig`] is the validated result.

use clap::{ArgAction, Parser};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:9009/api/order";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "bloom-pizza.log";

/// Command-line arguments of the order client.
#[derive(Debug, Parser)]
#[command(name = "bloom-pizza", version, about = "Order a pizza from Bloom Pizza in your terminal")]
pub struct CliArgs {
    /// URL that receives order requests.
    #[arg(long, env = "BLOOM_PIZZA_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Seconds to wait for the order service before giving up.
    #[arg(long = "timeout-secs", env = "BLOOM_PIZZA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// File that receives log output while the terminal UI is running.
    #[arg(long = "log-file", env = "BLOOM_PIZZA_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid order endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("order endpoint must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: Url,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub verbose: u8,
}

impl AppConfig {
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&args.endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: args.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme { scheme: endpoint.scheme().to_string() });
        }
        if args.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(args.timeout_secs),
            log_file: args.log_file.clone(),
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["bloom-pizza"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_flags() {
        let args = parse(&[
            "--endpoint",
            "https://pizza.example.com/api/order",
            "--timeout-secs",
            "3",
            "--log-file",
            "/tmp/orders.log",
            "-vv",
        ]);
        let config = AppConfig::from_args(&args).unwrap();
        assert_eq!(config.endpoint.as_str(), "https://pizza.example.com/api/order");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.log_file, PathBuf::from("/tmp/orders.log"));
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn test_invalid_endpoint() {
        let args = parse(&["--endpoint", "not a url"]);
        assert!(matches!(
            AppConfig::from_args(&args),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_unsupported_scheme() {
        let args = parse(&["--endpoint", "ftp://pizza.example.com/order"]);
        assert_eq!(
            AppConfig::from_args(&args).unwrap_err(),
            ConfigError::UnsupportedScheme { scheme: "ftp".to_string() }
        );
    }

    #[test]
    fn test_zero_timeout() {
        let args = parse(&["--endpoint", DEFAULT_ENDPOINT, "--timeout-secs", "0"]);
        assert_eq!(AppConfig::from_args(&args).unwrap_err(), ConfigError::ZeroTimeout);
    }
}
