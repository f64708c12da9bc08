use super::models::*;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DnsApiClient {
    /// Records in the zone matching both `name` and `record_type`.
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>>;

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord>;

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &DnsRecordUpdate,
    ) -> Result<DnsRecord>;
}

/// Where the host's current public address comes from.
#[async_trait]
pub trait AddressSource {
    async fn current_address(&self, record_type: RecordType) -> Result<String>;
}
