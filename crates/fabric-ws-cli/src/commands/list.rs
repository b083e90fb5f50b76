//! `fabric-ws list` — show visible workspaces, useful before a delete.

use fabric_ws_core::models::WorkspaceRecord;
use fabric_ws_core::{Config, WorkspaceApi, WorkspaceError};

use super::{connect, print_json};

pub async fn run(config: Config, json: bool) -> Result<Vec<WorkspaceRecord>, WorkspaceError> {
    let api = connect(&config).await?;
    let mut workspaces = api.list().await?;
    workspaces.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if json {
        print_json(&workspaces);
    } else {
        for ws in &workspaces {
            println!(
                "{}\t{}\t{}",
                ws.name,
                ws.id,
                ws.capacity_id.as_deref().unwrap_or("-")
            );
        }
        println!("{} workspaces", workspaces.len());
    }
    Ok(workspaces)
}
