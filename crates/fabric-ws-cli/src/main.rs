//! fabric-ws — provision and tear down Fabric / Power BI workspaces from CI.
//!
//! Exit status is non-zero only for fatal errors (bad input, failed
//! authentication, failed workspace listing). Per-workspace failures are
//! reported and the process still exits 0.

use clap::Parser;
use fabric_ws_cli::cli::{self, Cli, Commands};
use fabric_ws_cli::commands;

#[tokio::main]
async fn main() {
    // Load `.env` before parsing so env-backed flags see it.
    if !cli::skip_dotenv(std::env::args_os()) {
        dotenv::dotenv().ok();
    }

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fabric_ws_core=info,fabric_ws_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.connection.to_config() {
        Ok(config) => match &cli.command {
            Commands::Create(args) => commands::create::run(config, args, cli.json).await.map(|_| ()),
            Commands::Delete(args) => commands::delete::run(config, args, cli.json).await.map(|_| ()),
            Commands::List => commands::list::run(config, cli.json).await.map(|_| ()),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
