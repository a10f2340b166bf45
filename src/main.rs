use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twic_fetch::config::{BASE_URL, DEFAULT_WORKERS, USER_AGENT};
use twic_fetch::{Batch, Config, IdRange};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
    /// First issue to download
    #[clap(short = 's', long, default_value_t = 920)]
    start: u32,

    /// Issue to stop at (exclusive)
    #[clap(short = 'e', long, default_value_t = 1600)]
    end: u32,

    #[clap(short, long, default_value_t = DEFAULT_WORKERS)]
    parallel_requests: usize,

    #[clap(long, default_value = BASE_URL)]
    base_url: String,

    #[clap(long, default_value = USER_AGENT)]
    user_agent: String,

    /// Per-request timeout in seconds
    #[clap(short, long, default_value_t = 30)]
    timeout: u64,

    #[clap(long, default_value_t = 10)]
    max_redirects: usize,

    /// Directory receiving the PGN files
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Write a CSV with one outcome line per issue
    #[clap(long)]
    report: Option<PathBuf>,

    /// Also append log lines to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twic_fetch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let range = IdRange::new(args.start, args.end)?;
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("cannot create {}", args.output_dir.display()))?;

    let config = Config {
        base_url: args.base_url,
        user_agent: args.user_agent,
        workers: args.parallel_requests,
        request_timeout: Duration::from_secs(args.timeout),
        max_redirects: args.max_redirects,
        output_dir: args.output_dir,
        ..Config::default()
    };
    let batch = Batch::from_config(config)?;

    let summary = batch.run(range).await;

    if let Some(path) = &args.report {
        twic_fetch::write_report(&summary, path)
            .with_context(|| format!("cannot write report {}", path.display()))?;
    }

    Ok(())
}
