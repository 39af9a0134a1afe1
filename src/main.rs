use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tally", about = "Tally — bitable expense webhook bridge")]
struct Cli {
    /// Path to a TOML config file; built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the listen port from the config.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => tally_core::config::Config::load(path)?,
        None => tally_core::config::Config::defaults(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tally_server::run(config).await
}
