//! Service endpoints and client settings.

use std::env;
use std::time::Duration;

use crate::error::LookupError;


pub const ARIN_URL: &str = "https://whois.arin.net";
pub const IPINFO_URL: &str = "https://ipinfo.io";
pub const IPAPI_URL: &str = "http://ip-api.com";

/// Per-request timeout used unless `IPOWNER_TIMEOUT` says otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);


/// Where to find the lookup services and how long to wait for them
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the ARIN REST WHOIS service
    pub arin_url: String,
    /// Base URL of ipinfo.io
    pub ipinfo_url: String,
    /// Base URL of ip-api.com
    pub ipapi_url: String,
    /// Timeout applied to every single HTTP request
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            arin_url: ARIN_URL.to_string(),
            ipinfo_url: IPINFO_URL.to_string(),
            ipapi_url: IPAPI_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("ipowner/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Build configuration from defaults overridden by environment variables
    ///
    /// Recognised variables are `IPOWNER_ARIN_URL`, `IPOWNER_IPINFO_URL`,
    /// `IPOWNER_IPAPI_URL` and `IPOWNER_TIMEOUT` (whole seconds).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Config`] if `IPOWNER_TIMEOUT` is not a positive integer.
    ///
    pub fn from_env() -> Result<Config, LookupError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Config, LookupError>
        where F: Fn(&str) -> Option<String>
    {
        let mut config = Config::default();

        if let Some(url) = lookup("IPOWNER_ARIN_URL") {
            config.arin_url = url;
        }
        if let Some(url) = lookup("IPOWNER_IPINFO_URL") {
            config.ipinfo_url = url;
        }
        if let Some(url) = lookup("IPOWNER_IPAPI_URL") {
            config.ipapi_url = url;
        }
        if let Some(timeout) = lookup("IPOWNER_TIMEOUT") {
            config.timeout = parse_timeout(&timeout)?;
        }

        Ok(config)
    }
}


fn parse_timeout(value: &str) -> Result<Duration, LookupError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(LookupError::Config(format!("IPOWNER_TIMEOUT must be a positive number of seconds, got {:?}", value))),
    }
}
