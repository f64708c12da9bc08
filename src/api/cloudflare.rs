use std::time::Duration;

use super::{client::DnsApiClient, models::*};
use crate::config::ApiToken;
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, log_enabled, trace, Level};
use reqwest::Method;
use serde::de::DeserializeOwned;

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

pub struct CloudflareClient {
    client: reqwest::Client,
    base_url: String,
    api_token: ApiToken,
}

#[async_trait]
impl DnsApiClient for CloudflareClient {
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        let query = [("type", record_type.as_str()), ("name", name)];
        self.send(Method::GET, self.records_url(zone_id), &query, None)
            .await
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        let url = format!("{}/{}", self.records_url(zone_id), record_id);
        self.send(Method::GET, url, &[], None).await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &DnsRecordUpdate,
    ) -> Result<DnsRecord> {
        let url = format!("{}/{}", self.records_url(zone_id), record_id);
        self.send(Method::PUT, url, &[], Some(update)).await
    }
}

impl CloudflareClient {
    pub fn new(api_token: ApiToken, timeout: Duration) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, api_token, timeout)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_token: ApiToken,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn records_url(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/dns_records", self.base_url, zone_id)
    }

    /// Sends one request and unwraps the `{ success, errors, result }`
    /// envelope. A `success: false` body counts as a failure even on 2xx.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        query: &[(&str, &str)],
        body: Option<&DnsRecordUpdate>,
    ) -> Result<T> {
        debug!("Sending {} request to {}", method, url);
        debug!("Headers: Authorization: Bearer ***, Content-Type: application/json");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(self.api_token.expose())
            .header("Content-Type", "application/json");

        if !query.is_empty() {
            debug!("Query: {:?}", query);
            request = request.query(query);
        }
        if let Some(body) = body {
            if log_enabled!(Level::Trace) {
                if let Ok(pretty) = serde_json::to_string_pretty(body) {
                    trace!("Data:\n{}", pretty);
                }
            }
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| Error::Transport {
            method: method.clone(),
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| Error::Transport {
            method: method.clone(),
            url: url.clone(),
            source,
        })?;
        trace!("Response ({}): {}", status, text);

        if !status.is_success() {
            return Err(Error::Api {
                method,
                url,
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ApiResponse<T> =
            serde_json::from_str(&text).map_err(|source| Error::Decode {
                url: url.clone(),
                body: text.clone(),
                source,
            })?;

        if !parsed.success {
            let errors = parsed
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Api {
                method,
                url,
                status: status.as_u16(),
                body: errors,
            });
        }

        for message in &parsed.messages {
            trace!("Cloudflare message: {}", message);
        }

        parsed.result.ok_or_else(|| Error::Api {
            method,
            url,
            status: status.as_u16(),
            body: "response carried no result".to_string(),
        })
    }
}
