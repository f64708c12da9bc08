//! Error types for the DNS record updater.

use std::path::PathBuf;

use reqwest::Method;
use thiserror::Error;

use crate::api::models::RecordType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// One or more required settings were not provided.
    #[error("the following environment variables were not set: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("failed to load config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no {record_type} record found for {hostname}")]
    RecordNotFound {
        hostname: String,
        record_type: RecordType,
    },

    #[error("{count} {record_type} records found for {hostname}, refusing to pick one")]
    AmbiguousRecord {
        hostname: String,
        record_type: RecordType,
        count: usize,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (timeout, refused connection, ...).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}: {body}")]
    Api {
        method: Method,
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to parse response from {url}: {source}. Response: {body}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("public address endpoint returned {0:?}, which is not a usable address")]
    InvalidAddress(String),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config_file(path: impl Into<PathBuf>, msg: impl ToString) -> Self {
        Self::ConfigFile {
            path: path.into(),
            message: msg.to_string(),
        }
    }
}
