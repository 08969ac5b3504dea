use anyhow::{Context, Result};
use ccimport::config::Config;
use ccimport::confluent::auth::{Credentials, API_KEY_ENV, API_SECRET_ENV};
use ccimport::confluent::client::ClientFactory;
use ccimport::output::{ImportDocument, OutputFormat};
use ccimport::resource::{init_all_resources, resolve_resources};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Enumerate Confluent Cloud resources and emit import descriptors
#[derive(Parser, Debug)]
#[command(name = "ccimport", version, about, long_about = None)]
struct Args {
    /// Resource kinds to enumerate (comma separated); all kinds when omitted
    #[arg(short, long, value_delimiter = ',')]
    resources: Vec<String>,

    /// Confluent Cloud API endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Retry ceiling for 429 / 5xx responses and network failures
    #[arg(long)]
    max_retries: Option<u32>,

    /// Cloud API key
    #[arg(long, env = API_KEY_ENV)]
    cloud_api_key: Option<String>,

    /// Cloud API secret
    #[arg(long, env = API_SECRET_ENV, hide_env_values = true)]
    cloud_api_secret: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the import document to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Persist the effective endpoint and retry ceiling
    #[arg(long)]
    save_config: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let default_directive = match level.to_tracing_level() {
        Some(level) => level.to_string().to_lowercase(),
        None if std::env::var_os("RUST_LOG").is_none() => return Ok(None),
        None => "off".to_string(),
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let (non_blocking, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::debug!("ccimport started with log level: {:?}", level);

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = setup_logging(args.log_level, args.log_file.as_ref())?;

    let mut config = Config::load();
    let endpoint = config.effective_endpoint(args.endpoint.as_deref());
    let policy = config.effective_retry_policy(args.max_retries);
    let format = config.effective_format(args.format);
    let defs = resolve_resources(&config.effective_resources(&args.resources))?;

    if args.save_config {
        config.endpoint = Some(endpoint.clone());
        config.max_retries = Some(policy.max_retries);
        config.save().context("Failed to save configuration")?;
        tracing::info!("Configuration saved to {:?}", Config::config_path());
    }

    let credentials = Credentials::new(args.cloud_api_key, args.cloud_api_secret);
    let factory = ClientFactory::new(&endpoint, policy, credentials)?;

    let resources = init_all_resources(&factory, &defs).await?;
    tracing::info!("Collected {} resources", resources.len());

    ImportDocument::new(resources).write(format, args.output.as_deref())
}
