//! Keeps one Cloudflare DNS record pointed at the host's current address.
//!
//! A run resolves the record id, fetches the record, works out the current
//! address and issues a single `PUT` if the two differ. Nothing is retried:
//! the first failure ends the run.

use std::fmt;

use crate::api::{models::*, AddressSource, DnsApiClient};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use validator::Validate;

// Stand-ins for provider responses during a dry run.
pub const PLACEHOLDER_ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const PLACEHOLDER_RECORD_ID: &str = "372e67954025e0ba6aaa6d586b9e0b59";

/// A value that came back from the provider, or the placeholder standing in
/// for it when nothing was sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Real(T),
    Simulated(T),
}

impl<T> Fetched<T> {
    pub fn get(&self) -> &T {
        match self {
            Fetched::Real(value) | Fetched::Simulated(value) => value,
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Fetched::Simulated(_))
    }
}

/// What to do when more than one record matches the hostname and type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MultipleMatchPolicy {
    /// Log a warning and use the first record.
    #[default]
    Warn,
    /// Abort the run.
    Fail,
}

#[derive(Debug, Clone, Validate)]
pub struct ReconcileRequest {
    #[validate(length(min = 1, message = "hostname cannot be empty"))]
    pub hostname: String,

    /// Used instead of asking the public address endpoint.
    pub ip_override: Option<String>,

    #[validate(range(min = 1, message = "TTL must be greater than 0"))]
    pub ttl: u32,

    pub record_type: RecordType,
    pub dry_run: bool,
    pub on_multiple: MultipleMatchPolicy,
}

impl ReconcileRequest {
    pub fn new(hostname: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            hostname: hostname.into(),
            ip_override: None,
            ttl: 3600,
            record_type,
            dry_run: false,
            on_multiple: MultipleMatchPolicy::default(),
        }
    }

    fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::invalid_input(e.to_string()))?;

        if let Some(address) = &self.ip_override {
            if !self.record_type.accepts(address) {
                return Err(Error::invalid_input(format!(
                    "{:?} is not valid content for a {} record",
                    address, self.record_type
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Unchanged {
        record: Fetched<DnsRecord>,
    },
    Updated {
        previous: String,
        record: Fetched<DnsRecord>,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Unchanged { .. } => write!(f, "DNS record unchanged."),
            Outcome::Updated { previous, record } if record.is_simulated() => write!(
                f,
                "Dry run: would update DNS record of {} from {} to {}",
                record.get().name,
                previous,
                record.get().content
            ),
            Outcome::Updated { record, .. } => write!(
                f,
                "Successfully updated DNS record of {} to point to {}",
                record.get().name,
                record.get().content
            ),
        }
    }
}

pub struct Reconciler<C, A> {
    client: C,
    addresses: A,
    zone_id: String,
    record_id: Option<String>,
}

impl<C, A> Reconciler<C, A>
where
    C: DnsApiClient + Sync,
    A: AddressSource + Sync,
{
    pub fn new(client: C, addresses: A, zone_id: impl Into<String>) -> Self {
        Self {
            client,
            addresses,
            zone_id: zone_id.into(),
            record_id: None,
        }
    }

    /// Uses a known record id instead of looking it up.
    pub fn with_record_id(mut self, record_id: Option<String>) -> Self {
        self.record_id = record_id;
        self
    }

    pub async fn reconcile(&self, request: &ReconcileRequest) -> Result<Outcome> {
        request.check()?;
        info!("dry run = {}", request.dry_run);

        let zone_id = self.zone_id(request);
        let record_id = self.resolve_record_id(zone_id, request).await?;
        let record = self
            .fetch_record(zone_id, record_id.get(), request)
            .await?;
        let current = self.current_address(request).await?;

        // Compare first so the record is only written when it actually changed.
        let content = &record.get().content;
        if *content == current {
            info!("{} already points to {}", request.hostname, current);
            return Ok(Outcome::Unchanged { record });
        }

        info!(
            "Current IP {} differs from DNS record content {}",
            current, content
        );
        let previous = content.clone();
        let update = DnsRecordUpdate {
            r#type: request.record_type,
            name: request.hostname.clone(),
            content: current,
            ttl: request.ttl,
            proxied: false,
        };
        let record = self
            .update_record(zone_id, record_id.get(), &update, request)
            .await?;

        Ok(Outcome::Updated { previous, record })
    }

    fn zone_id<'a>(&'a self, request: &ReconcileRequest) -> &'a str {
        if request.dry_run {
            debug!("Picking dummy value for Zone ID: {}", PLACEHOLDER_ZONE_ID);
            PLACEHOLDER_ZONE_ID
        } else {
            &self.zone_id
        }
    }

    async fn resolve_record_id(
        &self,
        zone_id: &str,
        request: &ReconcileRequest,
    ) -> Result<Fetched<String>> {
        if request.dry_run {
            debug!("Picking dummy value for Record ID: {}", PLACEHOLDER_RECORD_ID);
            return Ok(Fetched::Simulated(PLACEHOLDER_RECORD_ID.to_string()));
        }
        if let Some(record_id) = &self.record_id {
            debug!("Using configured Record ID: {}", record_id);
            return Ok(Fetched::Real(record_id.clone()));
        }

        info!("Getting Record ID for {}", request.hostname);
        let records = self
            .client
            .list_records(zone_id, &request.hostname, request.record_type)
            .await?;

        let record_id = select_record(records, request)?;
        debug!("Record ID for {} is {}", request.hostname, record_id);
        Ok(Fetched::Real(record_id))
    }

    async fn fetch_record(
        &self,
        zone_id: &str,
        record_id: &str,
        request: &ReconcileRequest,
    ) -> Result<Fetched<DnsRecord>> {
        if request.dry_run {
            return Ok(Fetched::Simulated(placeholder_record(request)));
        }

        info!("Getting DNS record...");
        let record = self.client.get_record(zone_id, record_id).await?;
        debug!("Record {} currently holds {}", record.name, record.content);
        Ok(Fetched::Real(record))
    }

    async fn current_address(&self, request: &ReconcileRequest) -> Result<String> {
        match &request.ip_override {
            Some(address) => {
                debug!("Using supplied address {}", address);
                Ok(address.clone())
            }
            None => self.addresses.current_address(request.record_type).await,
        }
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &DnsRecordUpdate,
        request: &ReconcileRequest,
    ) -> Result<Fetched<DnsRecord>> {
        if request.dry_run {
            info!("Dry run, not sending update: {:?}", update);
            return Ok(Fetched::Simulated(update.applied_to(record_id)));
        }

        info!("Sending request to update record...");
        let record = self
            .client
            .update_record(zone_id, record_id, update)
            .await?;
        Ok(Fetched::Real(record))
    }
}

fn select_record(records: Vec<DnsRecord>, request: &ReconcileRequest) -> Result<String> {
    let count = records.len();
    let mut records = records.into_iter();

    let first = records.next().ok_or_else(|| Error::RecordNotFound {
        hostname: request.hostname.clone(),
        record_type: request.record_type,
    })?;

    if count > 1 {
        match request.on_multiple {
            MultipleMatchPolicy::Warn => warn!(
                "{} {} records found for {}, using the first one ({})",
                count, request.record_type, request.hostname, first.id
            ),
            MultipleMatchPolicy::Fail => {
                return Err(Error::AmbiguousRecord {
                    hostname: request.hostname.clone(),
                    record_type: request.record_type,
                    count,
                })
            }
        }
    }
    Ok(first.id)
}

fn placeholder_record(request: &ReconcileRequest) -> DnsRecord {
    let content = match request.record_type {
        RecordType::A => "127.0.0.1",
        RecordType::Aaaa => "::1",
        RecordType::Cname => "example.com",
    };

    DnsRecord {
        id: PLACEHOLDER_RECORD_ID.to_string(),
        name: request.hostname.clone(),
        content: content.to_string(),
        r#type: request.record_type,
        proxied: false,
        ttl: 3600,
    }
}
