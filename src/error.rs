//! Error type shared by every lookup source and the batch driver.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;


/// Errors produced while querying a lookup service or reading a target
///
/// Source errors are never fatal to a resolution; [`resolve`](crate::resolve) logs them and
/// falls back to sentinel fields. Only [`LookupError::Directory`] and [`LookupError::Io`]
/// terminate a run.
///
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {0}")]
    Status(StatusCode),

    #[error("unexpected response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("service rejected query: {0}")]
    Rejected(String),

    #[error("{0} lookup thread panicked")]
    Panicked(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{} is a directory. Please provide a valid file path.", .0.display())]
    Directory(PathBuf),
}
