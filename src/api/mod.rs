pub mod address;
pub mod client;
pub mod cloudflare;
pub mod models;

pub use address::HttpAddressSource;
pub use client::{AddressSource, DnsApiClient};
pub use cloudflare::CloudflareClient;
