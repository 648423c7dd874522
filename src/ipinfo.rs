//! ipinfo.io: city, country and announcing organization.

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::LookupError;
use crate::http::fetch;


/// Subset of ipinfo.io's `/{ip}/json` answer
///
/// Bogon and reserved addresses come back without location fields, hence everything is
/// optional.
///
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct IpInfo {
    pub city: Option<String>,
    /// ISO 3166 two letter country code
    pub country: Option<String>,
    /// Announcing AS and its name, e.g. `AS15169 Google LLC`
    pub org: Option<String>,
}


/// Query ipinfo.io about `ip`
///
/// # Errors
///
/// Transport errors, non-success statuses and bodies that are not a JSON object.
///
pub fn query_ipinfo(client: &Client, base_url: &str, ip: &str) -> Result<IpInfo, LookupError> {
    let url = format!("{}/{}/json", base_url, ip);
    let body = fetch(client.get(&url))?;
    let info = parse_ipinfo(&body)?;
    debug!("ipinfo.io answered for {}: {:?}", ip, info);
    Ok(info)
}


pub fn parse_ipinfo(body: &str) -> Result<IpInfo, LookupError> {
    Ok(serde_json::from_str(body)?)
}
