use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dynu_dns::{
    BatchOutcome, Config, Context, DNSProvider, DNSRecord, DNSRecordType, DynuProvider, Error,
};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Manage DNS records hosted at Dynu.
///
/// Credentials come from DYNU_API_TOKEN; DYNU_OWN_DOMAIN, DYNU_API_URL and
/// DYNU_TIMEOUT are optional.
#[derive(Parser)]
#[command(name = "dynu-dns", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the records of a zone
    Get { zone: String },
    /// Create a record, ignoring any id
    Append {
        zone: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Update the record with the given id, or create it
    Set {
        zone: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete records by id
    Delete {
        zone: String,
        #[arg(long = "id", required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args)]
struct RecordArgs {
    #[arg(long = "type")]
    record_type: String,
    /// Name relative to the zone, @ for the apex
    #[arg(long, default_value = "@")]
    name: String,
    #[arg(long)]
    value: String,
    /// TTL in seconds
    #[arg(long, default_value_t = 300)]
    ttl: u64,
    /// MX priority
    #[arg(long, default_value_t = 0)]
    priority: u32,
    #[arg(long, default_value = "")]
    id: String,
}

impl From<RecordArgs> for DNSRecord {
    fn from(args: RecordArgs) -> Self {
        DNSRecord {
            id: args.id,
            record_type: DNSRecordType::from(args.record_type.to_uppercase().as_str()),
            name: args.name,
            value: args.value,
            ttl: Duration::from_secs(args.ttl),
            priority: args.priority,
        }
    }
}

fn record_with_id(id: String) -> DNSRecord {
    let mut record = DNSRecord::new(
        DNSRecordType::Other(String::new()),
        "",
        "",
        Duration::ZERO,
    );
    record.id = id;
    record
}

fn report(outcome: BatchOutcome) -> bool {
    for record in &outcome.records {
        println!("{record}");
    }
    match outcome.error {
        Some(err) => {
            error!("{err}");
            false
        }
        None => true,
    }
}

async fn run(provider: &impl DNSProvider, ctx: &Context, command: Command) -> Result<bool, Error> {
    let ok = match command {
        Command::Get { zone } => {
            for record in provider.get_records(ctx, &zone).await? {
                println!("{record}");
            }
            true
        }
        Command::Append { zone, record } => {
            report(provider.append_records(ctx, &zone, vec![record.into()]).await?)
        }
        Command::Set { zone, record } => {
            report(provider.set_records(ctx, &zone, vec![record.into()]).await?)
        }
        Command::Delete { zone, ids } => {
            let records = ids.into_iter().map(record_with_id).collect();
            report(provider.delete_records(ctx, &zone, records).await?)
        }
    };
    Ok(ok)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let provider = match Config::from_env().and_then(|config| DynuProvider::new(&config)) {
        Ok(provider) => provider,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (ctx, cancel) = Context::with_cancel();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            cancel.cancel();
        }
    });

    match run(&provider, &ctx, cli.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
