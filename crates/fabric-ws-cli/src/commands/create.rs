//! `fabric-ws create` — expand base names per environment and create workspaces.

use fabric_ws_core::flows;
use fabric_ws_core::naming::{self, parse_list};
use fabric_ws_core::{Config, CreateReport, WorkspaceError};

use super::{connect, print_json};
use crate::cli::CreateArgs;

pub async fn run(config: Config, args: &CreateArgs, json: bool) -> Result<CreateReport, WorkspaceError> {
    let config = config
        .with_capacity_id(args.capacity_id.clone())
        .with_admin_emails(parse_list(&args.admin_emails));
    let base_names = args.base_names();
    let environments = args.selected_environments()?;

    // Reject bad input before the token request.
    naming::expand(&base_names, &environments)?;

    let api = connect(&config).await?;
    let report = flows::run_create(&api, &config, &base_names, &environments).await?;

    if json {
        print_json(&report);
    } else {
        println!("{}", report);
    }
    Ok(report)
}
