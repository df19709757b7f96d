use anyhow::Result;
use clap::Parser;
use ianimate::cli::{run, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::info!("CLI arguments parsed, invoking run");
    let result = run(cli);
    match &result {
        Ok(_) => tracing::info!("run completed successfully"),
        Err(e) => tracing::error!(error = %e, "run exited with error"),
    }
    result
}
