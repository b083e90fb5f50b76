//! CLI command implementations.
//!
//! Each submodule corresponds to a subcommand and drives the matching
//! fabric-ws-core flow with a live Power BI client.

pub mod create;
pub mod delete;
pub mod list;

use fabric_ws_core::{Config, PowerBiClient, TokenClient, WorkspaceError};

/// Acquire a token once and build the Power BI client for this run.
///
/// Any failure here is fatal for the command.
pub async fn connect(config: &Config) -> Result<PowerBiClient, WorkspaceError> {
    tracing::info!(
        "[Cli] Authenticating client {} in tenant {}",
        config.credentials.client_id,
        config.credentials.tenant_id
    );
    let token = TokenClient::new(config)?.acquire().await?;
    PowerBiClient::new(config, token)
}

/// Pretty-print a serializable value to stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render JSON output: {}", e),
    }
}
