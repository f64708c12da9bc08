use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum RecordType {
    #[serde(rename = "A")]
    #[value(name = "A")]
    A,
    #[serde(rename = "AAAA")]
    #[value(name = "AAAA")]
    Aaaa,
    #[serde(rename = "CNAME")]
    #[value(name = "CNAME")]
    Cname,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
        }
    }

    /// Whether `content` is well-formed for a record of this type.
    pub fn accepts(&self, content: &str) -> bool {
        match self {
            RecordType::A => content.parse::<Ipv4Addr>().is_ok(),
            RecordType::Aaaa => content.parse::<Ipv6Addr>().is_ok(),
            RecordType::Cname => {
                !content.is_empty() && !content.contains(char::is_whitespace)
            }
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    pub r#type: RecordType,
    #[serde(default)]
    pub proxied: bool,
    pub ttl: u32,
}

/// Body of a `PUT /zones/:zone_id/dns_records/:record_id` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecordUpdate {
    pub r#type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl DnsRecordUpdate {
    /// The record as it will look once the provider has applied this update.
    pub fn applied_to(&self, record_id: &str) -> DnsRecord {
        DnsRecord {
            id: record_id.to_string(),
            name: self.name.clone(),
            content: self.content.clone(),
            r#type: self.r#type,
            proxied: self.proxied,
            ttl: self.ttl,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}
