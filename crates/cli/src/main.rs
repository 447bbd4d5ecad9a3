//! Storage inspector entry point.

use std::process::ExitCode;

use cli::Config;
use inspector::MemoryClipboard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 2. Pick the backend and run the views over it
    let reader = cli::reader_for(&config);
    let clipboard = MemoryClipboard::new();

    match cli::inspect(&config, reader, &clipboard).await {
        Ok(report) => {
            print!("{}", report.loading);
            println!("---");
            print!("{}", report.loaded);
            if let Some(copied) = report.copied {
                println!("--- copied: {copied}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "inspection failed");
            ExitCode::FAILURE
        }
    }
}
