//! Service settings loaded from the environment.

use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::ServiceError;
use employee_repository::config::DEFAULT_INDEX_NAME;
use employee_repository::StoreConfig;

/// Default listening port.
const DEFAULT_PORT: u16 = 8080;

/// Default OpenSearch URL.
const DEFAULT_STORE_URL: &str = "http://localhost:9200";

/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Runtime settings for the employee API.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// URL of the OpenSearch cluster.
    pub store_url: String,
    /// Store behaviour (index name, retries, list limit).
    pub store: StoreConfig,
    /// Fail startup unless the cluster reports healthy.
    pub healthcheck_on_start: bool,
    /// Create the employee index at startup if it is missing.
    pub ensure_index: bool,
    /// Upper bound on the time spent handling one request.
    pub request_timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Settings {
    /// Load settings from process environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: bind address (default: 0.0.0.0)
    /// - `PORT`: listening port (default: 8080)
    /// - `ELASTIC_URL` or `OPENSEARCH_URL`: store URL (default: http://localhost:9200)
    /// - `EMPLOYEE_INDEX`: index name (default: employee-db)
    /// - `STORE_MAX_RETRIES`: retries per store call (default: 3)
    /// - `STORE_RETRY_BACKOFF_MS`: base retry delay (default: 100)
    /// - `STORE_LIST_LIMIT`: maximum records listed (default: 1000)
    /// - `STORE_HEALTHCHECK`: verify cluster health at startup (default: false)
    /// - `STORE_ENSURE_INDEX`: create the index at startup (default: true)
    /// - `REQUEST_TIMEOUT_SECS`: per-request timeout (default: 30)
    /// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_url = lookup("ELASTIC_URL")
            .or_else(|| lookup("OPENSEARCH_URL"))
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string());

        let defaults = StoreConfig::default();
        let store = StoreConfig {
            index_name: lookup("EMPLOYEE_INDEX").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            max_retries: parse_var(&lookup, "STORE_MAX_RETRIES", defaults.max_retries)?,
            retry_backoff: Duration::from_millis(parse_var(
                &lookup,
                "STORE_RETRY_BACKOFF_MS",
                defaults.retry_backoff.as_millis() as u64,
            )?),
            list_limit: parse_var(&lookup, "STORE_LIST_LIMIT", defaults.list_limit)?,
            refresh_on_write: defaults.refresh_on_write,
        };

        Ok(Self {
            host: parse_var(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            store_url,
            store,
            healthcheck_on_start: parse_flag(&lookup, "STORE_HEALTHCHECK", false)?,
            ensure_index: parse_flag(&lookup, "STORE_ENSURE_INDEX", true)?,
            request_timeout: Duration::from_secs(parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            log_format: parse_var(&lookup, "LOG_FORMAT", LogFormat::default())?,
        })
    }

    /// The socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ServiceError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| ServiceError::config(format!("invalid {} '{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            "" => Ok(default),
            _ => Err(ServiceError::config(format!("invalid {} '{}'", key, raw))),
        },
        None => Ok(default),
    }
}
