use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{ArgAction, Parser};
use homebin::api::address::{IPV4_ENDPOINT, IPV6_ENDPOINT};
use homebin::api::{models::RecordType, CloudflareClient, HttpAddressSource};
use homebin::config::Credentials;
use homebin::ddns::{MultipleMatchPolicy, Outcome, ReconcileRequest, Reconciler};
use homebin::{logging, Result};
use log::error;

/// Updates a DNS record on Cloudflare to match this host's public address.
///
/// Reads CF_DNS_API_TOKEN and CF_DNS_ZONE_ID (and optionally CF_DNS_RECORD_ID)
/// from the environment.
#[derive(Parser, Debug)]
#[command(name = "update-dns-record", version)]
struct Args {
    /// Hostname to update
    #[arg(long)]
    hostname: String,

    /// Instead of looking up this host's IP, use this one
    #[arg(long)]
    ip_address: Option<String>,

    /// TTL in seconds for the DNS record
    #[arg(long, default_value_t = 3600)]
    ttl: u32,

    /// Record type
    #[arg(long = "type", value_enum, ignore_case = true, default_value = "A")]
    record_type: RecordType,

    /// Timeout in seconds for each request
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Run without sending any requests to Cloudflare
    #[arg(long, alias = "dryrun")]
    dry_run: bool,

    /// Print more, repeat for more detail (up to -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// YAML file with api_token, zone_id and record_id; the environment wins
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to do when several records match the hostname and type
    #[arg(long, value_enum, default_value = "warn")]
    on_multiple: MultipleMatchPolicy,

    /// Endpoint answering with this host's IPv4 address
    #[arg(long, default_value = IPV4_ENDPOINT)]
    ipv4_endpoint: String,

    /// Endpoint answering with this host's IPv6 address
    #[arg(long, default_value = IPV6_ENDPOINT)]
    ipv6_endpoint: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose.min(3));

    // Checked before any request goes out.
    let credentials = match Credentials::load(args.config.as_deref()) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        result = run(&args, &credentials) => match result {
            Ok(outcome) => {
                println!("{}", outcome);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", credentials.api_token.redact(&e.to_string()));
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted by ^C");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, credentials: &Credentials) -> Result<Outcome> {
    let timeout = Duration::from_secs(args.timeout);
    let client = CloudflareClient::new(credentials.api_token.clone(), timeout)?;
    let addresses = HttpAddressSource::new(&args.ipv4_endpoint, &args.ipv6_endpoint, timeout)?;

    let reconciler = Reconciler::new(client, addresses, &credentials.zone_id)
        .with_record_id(credentials.record_id.clone());

    let request = ReconcileRequest {
        hostname: args.hostname.clone(),
        ip_override: args.ip_address.clone(),
        ttl: args.ttl,
        record_type: args.record_type,
        dry_run: args.dry_run,
        on_multiple: args.on_multiple,
    };
    reconciler.reconcile(&request).await
}
