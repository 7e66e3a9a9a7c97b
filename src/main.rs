use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paylink::application::service::PaymentRequestService;
use paylink::config::{DEFAULT_BASE_URL, Latency, ServiceConfig};
use paylink::domain::payment_request::{PaymentRequest, RequestId};
use paylink::domain::ports::PaymentRequestStoreBox;
use paylink::domain::validation::{
    CandidateRequest, DUE_WINDOW_HOURS, Field, ValidationErrors, due_window,
};
use paylink::error::PaymentError;
use paylink::infrastructure::clock::SystemClock;
use paylink::infrastructure::in_memory::InMemoryPaymentRequestStore;
#[cfg(feature = "storage-rocksdb")]
use paylink::infrastructure::rocksdb::RocksDBStore;
use paylink::interfaces::csv::request_reader::RequestReader;
use paylink::interfaces::csv::request_writer::RequestWriter;
use paylink::interfaces::display::{RequestView, render_summary};
use serde_json::json;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PAYLINK_DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    /// Seed the in-memory store with the demo customers.
    #[arg(long, global = true)]
    demo: bool,

    /// Delay each operation the way the demo backend does.
    #[arg(long, global = true)]
    simulate_latency: bool,

    /// Origin that payment links are built on.
    #[arg(long, env = "PAYLINK_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Output format. `text` prints CSV for listings and a detail block otherwise.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all payment requests, most recent first
    List,
    /// Show one payment request with its payment code and link
    Show { id: RequestId },
    /// Create a payment request due within the next 24 hours
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: String,
        /// Due date as RFC 3339 or YYYY-MM-DDTHH:MM (UTC). Defaults to 24 hours from now.
        #[arg(long, conflicts_with = "due_in_minutes")]
        due_date: Option<String>,
        /// Due date relative to now, in minutes
        #[arg(long, allow_negative_numbers = true)]
        due_in_minutes: Option<i64>,
    },
    /// Mark a payment request as paid
    Pay { id: RequestId },
    /// Create payment requests from a CSV file with name, amount and due_date columns
    Import { input: PathBuf },
    /// Print dashboard statistics
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let latency = if cli.simulate_latency {
        Latency::simulated()
    } else {
        Latency::none()
    };
    let config = ServiceConfig::default().with_base_url(&cli.base_url);

    let service =
        PaymentRequestService::new(open_store(&cli)?, Box::new(SystemClock)).with_latency(latency);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => {
            let requests = service.list().await?;
            print_requests(&mut out, &requests, &service, &config, cli.format)?;
        }
        Command::Show { id } => {
            let request = service.get(id).await?.ok_or(PaymentError::NotFound(id))?;
            print_request(&mut out, &request, &service, &config, cli.format)?;
        }
        Command::Create {
            name,
            amount,
            due_date,
            due_in_minutes,
        } => {
            let created = match resolve_due_date(service.now(), due_date, due_in_minutes) {
                Ok(due_date) => {
                    service
                        .create(CandidateRequest::new(name, amount, due_date))
                        .await
                }
                Err(errors) => Err(PaymentError::InvalidInput(errors)),
            };
            match created {
                Ok(request) => print_request(&mut out, &request, &service, &config, cli.format)?,
                Err(PaymentError::InvalidInput(errors)) => {
                    if cli.format == OutputFormat::Json {
                        serde_json::to_writer_pretty(&mut out, &json!({ "errors": &errors }))
                            .into_diagnostic()?;
                        writeln!(out).into_diagnostic()?;
                    }
                    return Err(PaymentError::InvalidInput(errors).into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Pay { id } => {
            let request = service.mark_paid(id).await?;
            print_request(&mut out, &request, &service, &config, cli.format)?;
        }
        Command::Import { input } => {
            let file = File::open(input).into_diagnostic()?;
            for candidate in RequestReader::new(file).candidates() {
                match candidate {
                    Ok(candidate) => {
                        if let Err(e) = service.create(candidate).await {
                            warn!("Error creating payment request: {}", e);
                        }
                    }
                    Err(e) => {
                        warn!("Error reading payment request: {}", e);
                    }
                }
            }

            let requests = service.list().await?;
            print_requests(&mut out, &requests, &service, &config, cli.format)?;
        }
        Command::Summary => {
            let summary = service.summary().await?;
            match cli.format {
                OutputFormat::Text => write!(out, "{}", render_summary(&summary)).into_diagnostic()?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &summary).into_diagnostic()?;
                    writeln!(out).into_diagnostic()?;
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Turns the `create` due-date flags into the text the validator parses.
///
/// An offset too large to represent is rejected up front instead of
/// overflowing the clock arithmetic.
fn resolve_due_date(
    now: DateTime<Utc>,
    due_date: Option<String>,
    due_in_minutes: Option<i64>,
) -> std::result::Result<String, ValidationErrors> {
    match (due_date, due_in_minutes) {
        (Some(due_date), _) => Ok(due_date),
        (None, Some(minutes)) => TimeDelta::try_minutes(minutes)
            .and_then(|delta| now.checked_add_signed(delta))
            .map(|due| due.to_rfc3339())
            .ok_or_else(|| {
                let message = if minutes < 0 {
                    "due date must be in the future".to_string()
                } else {
                    format!("due date must be within {DUE_WINDOW_HOURS} hours from now")
                };
                ValidationErrors::single(Field::DueDate, message)
            }),
        (None, None) => Ok((now + due_window()).to_rfc3339()),
    }
}

fn open_store(cli: &Cli) -> Result<PaymentRequestStoreBox> {
    if let Some(db_path) = &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            if cli.demo {
                warn!(
                    path = %db_path.display(),
                    "Demo data is only seeded into in-memory storage. Ignoring --demo for the RocksDB store."
                );
            }
            let store = RocksDBStore::open(db_path)?;
            return Ok(Box::new(store));
        }

        #[cfg(not(feature = "storage-rocksdb"))]
        warn!(
            path = %db_path.display(),
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }

    if cli.demo {
        Ok(Box::new(InMemoryPaymentRequestStore::with_demo_data(
            Utc::now(),
        )?))
    } else {
        Ok(Box::new(InMemoryPaymentRequestStore::new()))
    }
}

fn print_requests(
    out: &mut impl Write,
    requests: &[PaymentRequest],
    service: &PaymentRequestService,
    config: &ServiceConfig,
    format: OutputFormat,
) -> Result<()> {
    let now = service.now();
    match format {
        OutputFormat::Text => RequestWriter::new(out).write_requests(requests, now)?,
        OutputFormat::Json => {
            let views: Vec<RequestView> = requests
                .iter()
                .map(|request| RequestView::new(request, now, &config.base_url))
                .collect();
            serde_json::to_writer_pretty(&mut *out, &views).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
    }
    Ok(())
}

fn print_request(
    out: &mut impl Write,
    request: &PaymentRequest,
    service: &PaymentRequestService,
    config: &ServiceConfig,
    format: OutputFormat,
) -> Result<()> {
    let view = RequestView::new(request, service.now(), &config.base_url);
    match format {
        OutputFormat::Text => write!(out, "{}", view.render()).into_diagnostic()?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
    }
    Ok(())
}
