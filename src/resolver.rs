//! Query all sources for an address and merge their answers.

use std::thread;

use log::warn;
use reqwest::blocking::Client;

use crate::arin::{self, Ownership};
use crate::config::Config;
use crate::error::LookupError;
use crate::http;
use crate::ipapi::{self, IpApi};
use crate::ipinfo::{self, IpInfo};
use crate::record::{or_null, LookupResult, Report};


/// The three lookup services an address is resolved against
///
/// Implementations must be shareable between threads since [`resolve`] queries all
/// sources concurrently.
///
pub trait Sources: Sync {
    /// Owner and netblock from the registry
    fn query_ownership(&self, ip: &str) -> Result<Ownership, LookupError>;
    /// City, country and organization
    fn query_ipinfo(&self, ip: &str) -> Result<IpInfo, LookupError>;
    /// ISP and AS number
    fn query_ip_api(&self, ip: &str) -> Result<IpApi, LookupError>;
}


/// [`Sources`] backed by the public HTTP services
///
pub struct HttpSources {
    client: Client,
    config: Config,
}

impl HttpSources {
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built (e.g. no TLS backend available).
    ///
    pub fn new(config: Config) -> Result<HttpSources, LookupError> {
        let client = http::client(&config)?;
        Ok(HttpSources { client: client, config: config })
    }
}

impl Sources for HttpSources {
    fn query_ownership(&self, ip: &str) -> Result<Ownership, LookupError> {
        arin::query_ownership(&self.client, &self.config.arin_url, ip)
    }

    fn query_ipinfo(&self, ip: &str) -> Result<IpInfo, LookupError> {
        ipinfo::query_ipinfo(&self.client, &self.config.ipinfo_url, ip)
    }

    fn query_ip_api(&self, ip: &str) -> Result<IpApi, LookupError> {
        ipapi::query_ip_api(&self.client, &self.config.ipapi_url, ip)
    }
}


/// Resolve one address against every source
///
/// The three queries run concurrently and are joined before merging. A failing source
/// only turns its own fields into the "null" sentinel and is logged at `warn` level.
/// If ARIN answers but the answer has no netblock, the whole row degrades to sentinels
/// except the address.
///
/// This function never fails.
///
pub fn resolve<S: Sources + ?Sized>(sources: &S, ip: &str) -> Report {
    let (ownership, info, api) = thread::scope(|scope| {
        let ownership = scope.spawn(|| sources.query_ownership(ip));
        let info = scope.spawn(|| sources.query_ipinfo(ip));
        let api = scope.spawn(|| sources.query_ip_api(ip));
        (join(ownership, "ARIN"), join(info, "ipinfo.io"), join(api, "ip-api.com"))
    });

    let mut record = LookupResult::empty(ip);

    match info {
        Ok(info) => {
            record.city = or_null(info.city.as_deref());
            record.country = or_null(info.country.as_deref());
            record.org = or_null(info.org.as_deref());
        }
        Err(err) => warn!("Failed to query ipinfo.io for {}: {}", ip, err),
    }

    match api {
        Ok(api) => {
            record.isp = or_null(api.isp.as_deref());
            record.asn = or_null(api.asn.as_deref());
        }
        Err(err) => warn!("Failed to query ip-api.com for {}: {}", ip, err),
    }

    let ownership = match ownership {
        Ok(ownership) => ownership,
        Err(err) => {
            warn!("ARIN API request failed for {}: {}", ip, err);
            return Report { record: record, ownership_found: false };
        }
    };

    match arin::extract_range(&ownership) {
        Ok(range) => {
            record.ip_range = range;
            record.org_name = arin::extract_org_name(&ownership);
            Report { record: record, ownership_found: true }
        }
        Err(err) => {
            warn!("Error extracting data for {}: {}", ip, err);
            Report { record: LookupResult::empty(ip), ownership_found: false }
        }
    }
}


/// Join a query thread, folding a panic into the same outcome as a failed request
///
fn join<T>(handle: thread::ScopedJoinHandle<Result<T, LookupError>>, source: &'static str)
    -> Result<T, LookupError>
{
    handle.join().unwrap_or_else(|_| Err(LookupError::Panicked(source)))
}


#[cfg(test)]
pub mod tests {
    use std::collections::HashMap;

    use crate::arin::{parse_ownership, Ownership};
    use crate::error::LookupError;
    use crate::ipapi::IpApi;
    use crate::ipinfo::IpInfo;
    use super::Sources;

    pub const OWNERSHIP: &str = r#"{"net": {
        "netBlocks": {"netBlock": {"cidrLength": {"$": "24"}, "startAddress": {"$": "8.8.8.0"}}},
        "orgRef": {"@name": "Google LLC"}
    }}"#;

    /// Canned answers keyed by address; an address without an entry fails that source.
    #[derive(Default)]
    pub struct FakeSources {
        pub ownership: HashMap<String, String>,
        pub ipinfo: HashMap<String, IpInfo>,
        pub ip_api: HashMap<String, IpApi>,
    }

    impl FakeSources {
        /// All three sources healthy for `ip`
        pub fn healthy(ip: &str) -> FakeSources {
            let mut fake = FakeSources::default();
            fake.ownership.insert(ip.to_string(), OWNERSHIP.to_string());
            fake.ipinfo.insert(ip.to_string(), IpInfo {
                city: Some("Mountain View".to_string()),
                country: Some("US".to_string()),
                org: Some("AS15169 Google LLC".to_string()),
            });
            fake.ip_api.insert(ip.to_string(), IpApi {
                status: Some("success".to_string()),
                message: None,
                isp: Some("Google LLC".to_string()),
                asn: Some("AS15169 Google LLC".to_string()),
            });
            fake
        }
    }

    fn unreachable() -> LookupError {
        LookupError::Rejected("unreachable".to_string())
    }

    impl Sources for FakeSources {
        fn query_ownership(&self, ip: &str) -> Result<Ownership, LookupError> {
            let body = self.ownership.get(ip).ok_or_else(unreachable)?;
            parse_ownership(body)
        }

        fn query_ipinfo(&self, ip: &str) -> Result<IpInfo, LookupError> {
            self.ipinfo.get(ip).cloned().ok_or_else(unreachable)
        }

        fn query_ip_api(&self, ip: &str) -> Result<IpApi, LookupError> {
            self.ip_api.get(ip).cloned().ok_or_else(unreachable)
        }
    }

    #[test]
    fn test_resolve_healthy() {
        use super::resolve;
        let report = resolve(&FakeSources::healthy("8.8.8.8"), "8.8.8.8");
        assert!(report.ownership_found);
        assert_eq!(report.record.csv_line(),
                   "8.8.8.8,8.8.8.0/24,Google LLC,Mountain View,US,AS15169 Google LLC,Google LLC,AS15169 Google LLC\n");
    }

    #[test]
    fn test_resolve_ownership_unreachable() {
        use super::resolve;
        let mut fake = FakeSources::healthy("8.8.8.8");
        fake.ownership.clear();
        let report = resolve(&fake, "8.8.8.8");
        assert!(!report.ownership_found);
        assert_eq!(report.record.org_name, "null");
        assert_eq!(report.record.ip_range, "null");
        assert_eq!(report.record.city, "Mountain View");
        assert_eq!(report.record.isp, "Google LLC");
        assert!(report.to_string().contains("No Result"));
    }

    #[test]
    fn test_resolve_geo_sources_fail_independently() {
        use super::resolve;
        let mut fake = FakeSources::healthy("8.8.8.8");
        fake.ip_api.clear();
        let report = resolve(&fake, "8.8.8.8");
        assert!(report.ownership_found);
        assert_eq!(report.record.org_name, "Google LLC");
        assert_eq!(report.record.city, "Mountain View");
        assert_eq!(report.record.isp, "null");
        assert_eq!(report.record.asn, "null");

        let mut fake = FakeSources::healthy("8.8.8.8");
        fake.ipinfo.clear();
        let report = resolve(&fake, "8.8.8.8");
        assert_eq!(report.record.city, "null");
        assert_eq!(report.record.country, "null");
        assert_eq!(report.record.org, "null");
        assert_eq!(report.record.asn, "AS15169 Google LLC");
    }

    #[test]
    fn test_resolve_customer_ref() {
        use super::resolve;
        let mut fake = FakeSources::healthy("203.0.113.7");
        fake.ownership.insert("203.0.113.7".to_string(), r#"{"net": {
            "customerRef": {"@name": "Example Hosting"},
            "netBlocks": {"netBlock": {"cidrLength": {"$": "28"}, "startAddress": {"$": "203.0.113.0"}}}
        }}"#.to_string());
        let report = resolve(&fake, "203.0.113.7");
        assert_eq!(report.record.org_name, "Example Hosting");
        assert_eq!(report.record.ip_range, "203.0.113.0/28");
    }

    #[test]
    fn test_resolve_missing_net_block() {
        use super::resolve;
        use crate::record::LookupResult;
        let mut fake = FakeSources::healthy("8.8.8.8");
        fake.ownership.insert("8.8.8.8".to_string(), r#"{"net": {"orgRef": {"@name": "Google LLC"}}}"#.to_string());
        let report = resolve(&fake, "8.8.8.8");
        assert!(!report.ownership_found);
        assert_eq!(report.record, LookupResult::empty("8.8.8.8"));
    }

    struct PanickingIpApi(FakeSources);

    impl Sources for PanickingIpApi {
        fn query_ownership(&self, ip: &str) -> Result<Ownership, LookupError> {
            self.0.query_ownership(ip)
        }

        fn query_ipinfo(&self, ip: &str) -> Result<IpInfo, LookupError> {
            self.0.query_ipinfo(ip)
        }

        fn query_ip_api(&self, _ip: &str) -> Result<IpApi, LookupError> {
            panic!("ip-api.com client blew up");
        }
    }

    #[test]
    fn test_resolve_survives_panicking_source() {
        use super::{join, resolve};
        use std::thread;

        let report = resolve(&PanickingIpApi(FakeSources::healthy("8.8.8.8")), "8.8.8.8");
        assert!(report.ownership_found);
        assert_eq!(report.record.city, "Mountain View");
        assert_eq!(report.record.isp, "null");
        assert_eq!(report.record.asn, "null");

        let result: Result<(), LookupError> = thread::scope(|scope| {
            join(scope.spawn(|| -> Result<(), LookupError> { panic!("boom") }), "ip-api.com")
        });
        match result {
            Err(LookupError::Panicked("ip-api.com")) => (),
            other => panic!("expected panicked ip-api.com, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_empty_values_become_null() {
        use super::resolve;
        let mut fake = FakeSources::healthy("8.8.8.8");
        fake.ipinfo.insert("8.8.8.8".to_string(), IpInfo {
            city: Some("".to_string()),
            country: None,
            org: Some("AS15169 Google LLC".to_string()),
        });
        let line = resolve(&fake, "8.8.8.8").record.csv_line();
        assert!(!line.contains(",,"));
        assert_eq!(line.trim_end().split(',').count(), 8);
        assert!(line.contains(",null,null,AS15169 Google LLC,"));
    }
}
