use std::collections::HashMap;

use crate::api::{DeleteStatus, WorkspaceApi};
use crate::error::WorkspaceError;
use crate::models::WorkspaceRecord;
use crate::naming::{self, normalize_name};
use crate::report::{DeleteItem, DeleteOutcome, DeleteReport, Failure};

/// Delete the workspaces named in `names` (comma-separated, exact names).
///
/// Fails on empty input and when the workspace listing itself fails; every
/// per-name problem ends up in the report instead.
pub async fn run_delete<A>(api: &A, names: &str) -> Result<DeleteReport, WorkspaceError>
where
    A: WorkspaceApi + ?Sized,
{
    let targets = naming::dedupe_names(naming::parse_list(names));
    if targets.is_empty() {
        return Err(WorkspaceError::Validation(
            "no workspace names provided".to_string(),
        ));
    }
    tracing::info!("[Delete] Workspaces targeted for deletion: {}", targets.join(", "));

    let existing = api.list().await.map_err(|err| {
        tracing::error!("[Delete] Failed to list workspaces: {}", err);
        err
    })?;

    Ok(delete_exact(api, &targets, &existing).await)
}

/// Delete each target whose normalized name equals exactly one existing
/// workspace's normalized name. Nothing is ever matched by prefix or substring.
pub async fn delete_exact<A>(
    api: &A,
    targets: &[String],
    existing: &[WorkspaceRecord],
) -> DeleteReport
where
    A: WorkspaceApi + ?Sized,
{
    let mut by_name: HashMap<String, Vec<&WorkspaceRecord>> = HashMap::new();
    for record in existing {
        by_name
            .entry(normalize_name(&record.name))
            .or_default()
            .push(record);
    }

    let resolved: Vec<(&String, Option<&Vec<&WorkspaceRecord>>)> = targets
        .iter()
        .map(|name| (name, by_name.get(&normalize_name(name))))
        .collect();

    let found: Vec<_> = resolved
        .iter()
        .filter_map(|(name, matches)| match matches {
            Some(m) if m.len() == 1 => Some((name.as_str(), m[0].id.as_str())),
            _ => None,
        })
        .collect();
    if found.is_empty() {
        tracing::info!("[Delete] None of the specified workspaces were found");
    } else {
        tracing::info!("[Delete] Found {} matching workspaces:", found.len());
        for (name, id) in &found {
            tracing::info!("[Delete]   • {} ({})", name, id);
        }
    }

    let mut report = DeleteReport {
        requested: targets.to_vec(),
        items: Vec::with_capacity(targets.len()),
    };

    for (name, matches) in resolved {
        let outcome = match matches.map(Vec::as_slice) {
            None | Some([]) => {
                let err = WorkspaceError::NotFound(format!("no workspace named '{}'", name));
                tracing::info!("[Delete] {}", err);
                DeleteOutcome::NotFound(Failure::from(&err))
            }
            Some([record]) => delete_one(api, name, &record.id).await,
            Some(many) => {
                let workspace_ids: Vec<String> = many.iter().map(|r| r.id.clone()).collect();
                tracing::warn!(
                    "[Delete] Skipping '{}': {} workspaces share this name ({})",
                    name,
                    many.len(),
                    workspace_ids.join(", ")
                );
                DeleteOutcome::Ambiguous { workspace_ids }
            }
        };
        report.items.push(DeleteItem {
            name: name.clone(),
            outcome,
        });
    }

    tracing::info!(
        "[Delete] Deletion completed. Successfully deleted {}/{} workspaces",
        report.deleted().len(),
        report.matched()
    );
    report
}

async fn delete_one<A>(api: &A, name: &str, workspace_id: &str) -> DeleteOutcome
where
    A: WorkspaceApi + ?Sized,
{
    let workspace_id = workspace_id.to_string();
    match api.delete(&workspace_id).await {
        Ok(DeleteStatus::Deleted) => {
            tracing::info!("[Delete] Deleted: {} ({})", name, workspace_id);
            DeleteOutcome::Deleted { workspace_id }
        }
        Ok(DeleteStatus::AlreadyDeleted) => {
            tracing::info!("[Delete] Already deleted: {}", name);
            DeleteOutcome::AlreadyDeleted { workspace_id }
        }
        Err(err) => {
            tracing::error!("[Delete] Delete failed for '{}': {}", name, err);
            DeleteOutcome::Failed {
                workspace_id,
                failure: Failure::from(&err),
            }
        }
    }
}
