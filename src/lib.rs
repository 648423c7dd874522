//! Resolve who owns an IP address and where it is, using three public services:
//! [ARIN](https://www.arin.net/resources/registry/whois/rws/api/)'s REST WHOIS for the owning
//! organization and netblock, [ipinfo.io](https://ipinfo.io) for city, country and announcing
//! organization and [ip-api.com](https://ip-api.com) for ISP and AS number.
//!
//! Please, see each service's terms of use before running large batches. None of them is
//! queried with an API key, so their anonymous rate limits apply.
//!
//! For the easiest lookup, build [`HttpSources`](resolver/struct.HttpSources.html) and call
//! [`resolve`](resolver/fn.resolve.html). To process a list of addresses see
//! [`batch::run`](batch/fn.run.html).

pub mod arin;
pub mod batch;
pub mod config;
pub mod error;
mod http;
pub mod ipapi;
pub mod ipinfo;
pub mod record;
pub mod resolver;

pub use config::Config;
pub use error::LookupError;
pub use record::{LookupResult, Report};
pub use resolver::{resolve, HttpSources, Sources};


/// Placeholder written for any value a source did not provide
pub const NULL: &str = "null";
