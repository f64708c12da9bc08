use std::time::Duration;

use super::{client::AddressSource, models::RecordType};
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Method;

pub const IPV4_ENDPOINT: &str = "https://ipv4.icanhazip.com";
pub const IPV6_ENDPOINT: &str = "https://ipv6.icanhazip.com";

/// Asks a plain-text "what is my address" endpoint, one per address family.
pub struct HttpAddressSource {
    client: reqwest::Client,
    ipv4_url: String,
    ipv6_url: String,
}

impl HttpAddressSource {
    pub fn new(
        ipv4_url: impl Into<String>,
        ipv6_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            ipv4_url: ipv4_url.into(),
            ipv6_url: ipv6_url.into(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let transport = |source| Error::Transport {
            method: Method::GET,
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(Error::Api {
                method: Method::GET,
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl AddressSource for HttpAddressSource {
    async fn current_address(&self, record_type: RecordType) -> Result<String> {
        let url = match record_type {
            RecordType::A => &self.ipv4_url,
            RecordType::Aaaa => &self.ipv6_url,
            RecordType::Cname => {
                return Err(Error::invalid_input(
                    "CNAME records have no public address to look up, pass --ip-address with the target",
                ))
            }
        };

        info!("Looking up current IP address for this host...");
        let address = self.fetch(url).await?;
        debug!("{} answered {}", url, address);

        if !record_type.accepts(&address) {
            return Err(Error::InvalidAddress(address));
        }
        Ok(address)
    }
}
