use crate::api::WorkspaceApi;
use crate::config::Config;
use crate::error::WorkspaceError;
use crate::models::{AdminAssignment, Environment, WorkspaceRequest};
use crate::naming;
use crate::report::{AdminOutcome, AdminResult, CreateItem, CreateOutcome, CreateReport, Failure};

/// Expand `base_names` x `environments` and create every workspace.
///
/// Fails only on invalid input, before any API call.
pub async fn run_create<A>(
    api: &A,
    config: &Config,
    base_names: &[String],
    environments: &[Environment],
) -> Result<CreateReport, WorkspaceError>
where
    A: WorkspaceApi + ?Sized,
{
    let requests = naming::expand(base_names, environments)?;

    let envs: Vec<&str> = {
        let mut envs = environments.to_vec();
        envs.sort();
        envs.dedup();
        envs.iter().map(|e| e.as_str()).collect()
    };
    tracing::info!("[Create] Base workspace names: {}", base_names.join(", "));
    tracing::info!("[Create] Selected environments: {}", envs.join(", "));
    if config.admin_emails.is_empty() {
        tracing::warn!("[Create] No admin emails provided, only the service principal will be a member");
    } else {
        tracing::info!("[Create] Admins to assign: {}", config.admin_emails.join(", "));
    }
    if config.capacity_id.is_none() {
        tracing::warn!("[Create] No capacity id set, workspaces will be created without assigned capacity");
    }

    Ok(create_all(api, &requests, config.capacity_id.as_deref(), &config.admin_emails).await)
}

/// Create each request, then grant Admin to every email on each created
/// workspace. Failures are recorded per item and never abort the batch; a
/// failed admin grant leaves its workspace in place.
pub async fn create_all<A>(
    api: &A,
    requests: &[WorkspaceRequest],
    capacity_id: Option<&str>,
    admin_emails: &[String],
) -> CreateReport
where
    A: WorkspaceApi + ?Sized,
{
    let mut report = CreateReport {
        requested: requests.iter().map(WorkspaceRequest::full_name).collect(),
        items: Vec::with_capacity(requests.len()),
    };

    for name in &report.requested {
        tracing::info!("[Create] Creating: {}", name);
        let outcome = match api.create(name, capacity_id).await {
            Ok(record) => {
                tracing::info!("[Create] Workspace created: {} ({})", name, record.id);
                CreateOutcome::Created {
                    workspace_id: record.id,
                }
            }
            Err(err) => {
                tracing::error!("[Create] Failed to create workspace '{}': {}", name, err);
                CreateOutcome::Failed(Failure::from(&err))
            }
        };
        report.items.push(CreateItem {
            name: name.clone(),
            outcome,
            admins: Vec::new(),
        });
    }

    for item in &mut report.items {
        let CreateOutcome::Created { workspace_id } = &item.outcome else {
            continue;
        };
        for email in admin_emails {
            let assignment = AdminAssignment {
                workspace_id: workspace_id.clone(),
                principal_email: email.clone(),
            };
            item.admins.push(assign_admin(api, &item.name, assignment).await);
        }
    }

    let summary = report.summary();
    tracing::info!(
        "[Create] Finished. Successfully created {}/{} workspaces",
        summary.created,
        summary.requested
    );
    report
}

async fn assign_admin<A>(api: &A, workspace_name: &str, assignment: AdminAssignment) -> AdminResult
where
    A: WorkspaceApi + ?Sized,
{
    let outcome = match api
        .add_admin(&assignment.workspace_id, &assignment.principal_email)
        .await
    {
        Ok(()) => {
            tracing::info!("[Create]   → Added admin to {}: {}", workspace_name, assignment.principal_email);
            AdminOutcome::Assigned
        }
        Err(err) => {
            tracing::warn!(
                "[Create]   → Failed to add admin {} to {}: {}",
                assignment.principal_email,
                workspace_name,
                err
            );
            AdminOutcome::Failed(Failure::from(&err))
        }
    };
    AdminResult {
        email: assignment.principal_email,
        outcome,
    }
}
