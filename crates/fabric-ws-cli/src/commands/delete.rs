//! `fabric-ws delete` — delete workspaces by exact name.

use fabric_ws_core::naming::parse_list;
use fabric_ws_core::{flows, Config, DeleteReport, WorkspaceError};

use super::{connect, print_json};
use crate::cli::DeleteArgs;

pub async fn run(config: Config, args: &DeleteArgs, json: bool) -> Result<DeleteReport, WorkspaceError> {
    if parse_list(&args.workspaces).is_empty() {
        return Err(WorkspaceError::Validation(
            "no workspace names provided".to_string(),
        ));
    }

    let api = connect(&config).await?;
    let report = flows::run_delete(&api, &args.workspaces).await?;

    if json {
        print_json(&report);
    } else {
        println!("{}", report);
    }
    Ok(report)
}
