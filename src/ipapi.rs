//! ip-api.com: ISP and AS number.
//!
//! The free endpoint answers 200 even for failed lookups and reports the outcome in the
//! `status` field instead.

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::LookupError;
use crate::http::fetch;


/// Subset of ip-api.com's `/json/{ip}` answer
///
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct IpApi {
    pub status: Option<String>,
    pub message: Option<String>,
    pub isp: Option<String>,
    /// AS number and name, e.g. `AS15169 Google LLC`
    #[serde(rename = "as")]
    pub asn: Option<String>,
}


/// Query ip-api.com about `ip`
///
/// # Errors
///
/// Besides transport, status and body errors, an answer with `"status": "fail"` is returned
/// as [`LookupError::Rejected`] carrying the service's message.
///
pub fn query_ip_api(client: &Client, base_url: &str, ip: &str) -> Result<IpApi, LookupError> {
    let url = format!("{}/json/{}", base_url, ip);
    let body = fetch(client.get(&url))?;
    let answer = parse_ip_api(&body)?;
    debug!("ip-api.com answered for {}: {:?}", ip, answer);
    Ok(answer)
}


pub fn parse_ip_api(body: &str) -> Result<IpApi, LookupError> {
    let answer: IpApi = serde_json::from_str(body)?;
    if answer.status.as_deref() == Some("fail") {
        let message = answer.message.unwrap_or_else(|| "unknown reason".to_string());
        return Err(LookupError::Rejected(message));
    }
    Ok(answer)
}
