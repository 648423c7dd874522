//! ARIN REST WHOIS: authoritative owner and netblock of an address.
//!
//! The JSON flavour of ARIN's API wraps scalar values in `{"$": ...}` objects and names
//! attributes with a leading `@`. Only the handful of fields used here are modelled.

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::error::LookupError;
use crate::http::fetch;
use crate::record::or_null;


/// Ownership record returned by `GET /rest/ip/{ip}`
///
#[derive(Debug, Deserialize, PartialEq)]
pub struct Ownership {
    /// The most specific network containing the queried address
    pub net: Net,
}

/// Network record
///
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Net {
    /// Organization the network is registered to
    pub org_ref: Option<Reference>,
    /// Customer of a reassigned network, used when no organization is referenced
    pub customer_ref: Option<Reference>,
    /// Address blocks making up the network
    pub net_blocks: Option<NetBlocks>,
}

/// Reference to an organization or customer record
#[derive(Debug, Deserialize, PartialEq)]
pub struct Reference {
    /// Display name of the referenced record
    #[serde(rename = "@name")]
    pub name: String,
}

/// Wrapper object around the list of netblocks
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetBlocks {
    /// One block, or several for networks spanning non-aligned ranges
    pub net_block: OneOrMany<NetBlock>,
}

/// ARIN collapses single element lists into a bare object.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Proper JSON array
    Many(Vec<T>),
    /// Bare object standing in for a one element list
    One(T),
}

impl<T> OneOrMany<T> {
    fn first(&self) -> Option<&T> {
        match *self {
            OneOrMany::One(ref item) => Some(item),
            OneOrMany::Many(ref items) => items.first(),
        }
    }
}

/// Contiguous CIDR block
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetBlock {
    /// First address of the block
    pub start_address: Option<Text>,
    /// Prefix length of the block
    pub cidr_length: Option<Text>,
}

/// Scalar value in ARIN's `{"$": ...}` wrapping
#[derive(Debug, Deserialize, PartialEq)]
pub struct Text {
    /// The value itself, always a string even for numbers
    #[serde(rename = "$")]
    pub value: String,
}


/// Query ARIN for the owner of `ip`
///
/// The address is passed through unvalidated; ARIN decides what it accepts.
///
/// # Errors
///
/// Transport errors, non-success statuses and bodies without a `net` object are all
/// returned as errors. None of them should abort a resolution.
///
pub fn query_ownership(client: &Client, base_url: &str, ip: &str) -> Result<Ownership, LookupError> {
    let url = format!("{}/rest/ip/{}", base_url, ip);
    let body = fetch(client.get(&url).header(ACCEPT, "application/json"))?;
    let ownership = parse_ownership(&body)?;
    debug!("ARIN answered for {}", ip);
    Ok(ownership)
}


/// Parse the JSON body of an ARIN `/rest/ip` response
///
pub fn parse_ownership(body: &str) -> Result<Ownership, LookupError> {
    Ok(serde_json::from_str(body)?)
}


/// Pick the owner name of a network
///
/// Organization reference wins over customer reference. If neither is present the
/// "null" sentinel is returned.
///
pub fn extract_org_name(ownership: &Ownership) -> String {
    let net = &ownership.net;
    let name = net.org_ref.as_ref()
        .or(net.customer_ref.as_ref())
        .map(|r| r.name.as_str());
    or_null(name)
}


/// Format the first netblock of a network as `start/length`
///
/// # Errors
///
/// A missing netblock, start address or prefix length is [`LookupError::MissingField`]. The
/// caller treats that as a failed ownership lookup rather than a missing field.
///
pub fn extract_range(ownership: &Ownership) -> Result<String, LookupError> {
    let block = ownership.net.net_blocks.as_ref()
        .and_then(|blocks| blocks.net_block.first())
        .ok_or(LookupError::MissingField("netBlocks.netBlock"))?;
    let start = block.start_address.as_ref()
        .ok_or(LookupError::MissingField("startAddress"))?;
    let length = block.cidr_length.as_ref()
        .ok_or(LookupError::MissingField("cidrLength"))?;
    Ok(format!("{}/{}", start.value, length.value))
}
