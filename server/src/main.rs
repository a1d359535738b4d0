use anyhow::Result;
use clap::Parser;
use server::{build_app, AppConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Local CSV dataset path
    #[arg(long, default_value = "./winemag-data.csv")]
    csv: PathBuf,
    /// URL to fetch the dataset from when the local copy is missing
    #[arg(long)]
    dataset_url: Option<String>,
    /// Maximum rows to load into memory
    #[arg(long, default_value_t = 5000)]
    load_limit: usize,
    /// Results per page
    #[arg(long, default_value_t = 12)]
    page_size: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = AppConfig {
        csv_path: args.csv,
        dataset_url: args.dataset_url,
        load_limit: args.load_limit,
        page_size: args.page_size,
        admin_token: std::env::var("ADMIN_TOKEN").ok(),
    };
    let app = build_app(config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
