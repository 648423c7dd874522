//! The merged per-address record and its two renderings.

use std::fmt;

use crate::NULL;


/// Everything known about one address after all sources have answered
///
/// Every field holds real data or the literal [`NULL`] sentinel, never an empty string.
/// Field order matches the column order of [`LookupResult::csv_line`].
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// Address exactly as given on input
    pub ip: String,
    /// First ARIN netblock as `start/length`
    pub ip_range: String,
    /// ARIN organization, or customer if no organization is referenced
    pub org_name: String,
    pub city: String,
    pub country: String,
    /// Organization as reported by ipinfo.io, unrelated to `org_name`
    pub org: String,
    pub isp: String,
    pub asn: String,
}

impl LookupResult {
    /// Record with every field but the address set to the sentinel
    ///
    pub fn empty(ip: &str) -> LookupResult {
        LookupResult {
            ip: ip.to_string(),
            ip_range: NULL.to_string(),
            org_name: NULL.to_string(),
            city: NULL.to_string(),
            country: NULL.to_string(),
            org: NULL.to_string(),
            isp: NULL.to_string(),
            asn: NULL.to_string(),
        }
    }

    /// One CSV row: `ip,ipRange,orgName,city,country,org,isp,asn` and a newline
    ///
    /// Values are not quoted. Commas inside a value (ISP names occasionally have them) will
    /// shift the columns of that row.
    ///
    pub fn csv_line(&self) -> String {
        format!("{},{},{},{},{},{},{},{}\n",
                self.ip, self.ip_range, self.org_name, self.city,
                self.country, self.org, self.isp, self.asn)
    }
}


/// A resolved address ready for display
///
/// `ownership_found` is false when ARIN could not be queried or its answer lacked a
/// netblock. The text rendering then shows "No Result" instead of the field breakdown;
/// the record itself is still complete.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub record: LookupResult,
    pub ownership_found: bool,
}

impl Report {
    /// Text block and CSV line for this report
    ///
    pub fn render(&self) -> (String, String) {
        (self.to_string(), self.record.csv_line())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = &self.record;
        writeln!(f, "[+] {}", r.ip)?;
        if !self.ownership_found {
            return writeln!(f, " |_ No Result\n");
        }
        writeln!(f, " |_ {}", r.org_name)?;
        writeln!(f, " |_ {}, {}", r.city, r.country)?;
        writeln!(f, " |_ Org: {}", r.org)?;
        writeln!(f, " |_ ISP: {}", r.isp)?;
        writeln!(f, " |_ ASN: {}", r.asn)?;
        writeln!(f, " _ {}\n", r.ip_range)
    }
}


/// Map missing or empty service values to the sentinel
///
pub fn or_null(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => NULL.to_string(),
    }
}
