//! Drive resolution over one address or a file of addresses.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;

use crate::error::LookupError;
use crate::record::Report;
use crate::resolver::{resolve, Sources};


/// What the command line target turned out to be
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Anything that is not an existing path is taken as an address
    Address(String),
    /// Newline separated list of addresses
    File(PathBuf),
}

impl Target {
    /// Classify a command line target
    ///
    /// # Errors
    ///
    /// An existing directory is [`LookupError::Directory`].
    ///
    pub fn classify(target: &str) -> Result<Target, LookupError> {
        let path = Path::new(target);
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Err(LookupError::Directory(path.to_path_buf())),
            Ok(_) => Ok(Target::File(path.to_path_buf())),
            Err(_) => Ok(Target::Address(target.to_string())),
        }
    }

    /// Addresses to resolve, in input order
    ///
    pub fn addresses(&self) -> Result<Vec<String>, LookupError> {
        match *self {
            Target::Address(ref ip) => Ok(vec![ip.clone()]),
            Target::File(ref path) => {
                let file = File::open(path)?;
                Ok(read_addresses(BufReader::new(file))?)
            }
        }
    }
}


/// Read one address per line, skipping blank lines and trimming whitespace
///
pub fn read_addresses<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut addresses = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let ip = line.trim();
        if !ip.is_empty() {
            addresses.push(ip.to_string());
        }
    }
    Ok(addresses)
}


/// Accumulated output of a run
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    /// Text blocks in input order, for callers that print once at the end rather than
    /// from the `run` callback
    pub text: String,
    /// CSV lines in input order
    pub csv: String,
    /// Number of addresses resolved
    pub count: usize,
}


/// Resolve `addresses` one after another
///
/// `on_report` is called as soon as an address is resolved, before the next one starts.
///
pub fn run<S, F>(sources: &S, addresses: &[String], mut on_report: F) -> BatchOutput
    where S: Sources + ?Sized,
          F: FnMut(&Report)
{
    let mut output = BatchOutput::default();

    for ip in addresses {
        let report = resolve(sources, ip);
        on_report(&report);

        let (text, csv) = report.render();
        output.text.push_str(&text);
        output.csv.push_str(&csv);
        output.count += 1;
    }

    output
}


/// Write `csv` to `output_<unix time>.csv` inside `dir`
///
/// An existing file with the same name (a second run within the same second) is
/// overwritten.
///
pub fn save_csv(dir: &Path, csv: &str) -> Result<PathBuf, LookupError> {
    let path = dir.join(format!("output_{}.csv", Utc::now().timestamp()));
    fs::write(&path, csv)?;
    info!("wrote {} bytes to {}", csv.len(), path.display());
    Ok(path)
}
