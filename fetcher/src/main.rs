use anyhow::Result;
use clap::Parser;
use fetcher::{build_client, fetch_dataset};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fetcher")]
#[command(about = "Download the wine review CSV dataset to a local file")]
struct Cli {
    /// Dataset URL
    #[arg(long)]
    url: String,
    /// Output CSV file path
    #[arg(long, default_value = "./winemag-data.csv")]
    output: PathBuf,
    /// Request timeout seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
    /// User-Agent string for the download request
    #[arg(long, default_value = "wine-catalog-fetcher/0.1")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let client = build_client(args.timeout_secs, &args.user_agent)?;
    let report = fetch_dataset(&client, &args.url, &args.output).await?;
    eprintln!(
        "done: bytes={} fetched_at={} -> {}",
        report.bytes,
        report.fetched_at,
        args.output.display()
    );
    Ok(())
}
