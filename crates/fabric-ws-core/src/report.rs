//! Per-item outcomes of a batch run, in request order.

use std::fmt;

use serde::Serialize;

use crate::error::WorkspaceError;

/// Reason recorded for a failed item.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub reason: String,
}

impl From<&WorkspaceError> for Failure {
    fn from(err: &WorkspaceError) -> Self {
        Self {
            status: err.status(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum CreateOutcome {
    #[serde(rename_all = "camelCase")]
    Created { workspace_id: String },
    Failed(Failure),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum AdminOutcome {
    Assigned,
    Failed(Failure),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminResult {
    pub email: String,
    pub outcome: AdminOutcome,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub name: String,
    pub outcome: CreateOutcome,
    pub admins: Vec<AdminResult>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateReport {
    pub requested: Vec<String>,
    pub items: Vec<CreateItem>,
}

impl CreateReport {
    /// Names that were created, with their new ids.
    pub fn created(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .filter_map(|item| match &item.outcome {
                CreateOutcome::Created { workspace_id } => Some((item.name.as_str(), workspace_id.as_str())),
                CreateOutcome::Failed(_) => None,
            })
            .collect()
    }

    pub fn failed(&self) -> Vec<(&str, &Failure)> {
        self.items
            .iter()
            .filter_map(|item| match &item.outcome {
                CreateOutcome::Failed(failure) => Some((item.name.as_str(), failure)),
                CreateOutcome::Created { .. } => None,
            })
            .collect()
    }

    /// `(workspace, email)` pairs granted Admin.
    pub fn admins_assigned(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .flat_map(|item| {
                item.admins.iter().filter_map(move |a| match a.outcome {
                    AdminOutcome::Assigned => Some((item.name.as_str(), a.email.as_str())),
                    AdminOutcome::Failed(_) => None,
                })
            })
            .collect()
    }

    pub fn admins_failed(&self) -> Vec<(&str, &str, &Failure)> {
        self.items
            .iter()
            .flat_map(|item| {
                item.admins.iter().filter_map(move |a| match &a.outcome {
                    AdminOutcome::Failed(failure) => Some((item.name.as_str(), a.email.as_str(), failure)),
                    AdminOutcome::Assigned => None,
                })
            })
            .collect()
    }

    pub fn summary(&self) -> CreateSummary {
        CreateSummary {
            requested: self.requested.len(),
            created: self.created().len(),
            failed: self.failed().len(),
            admins_assigned: self.admins_assigned().len(),
            admins_failed: self.admins_failed().len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSummary {
    pub requested: usize,
    pub created: usize,
    pub failed: usize,
    pub admins_assigned: usize,
    pub admins_failed: usize,
}

impl fmt::Display for CreateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match &item.outcome {
                CreateOutcome::Created { workspace_id } => {
                    writeln!(f, "created   {} ({})", item.name, workspace_id)?
                }
                CreateOutcome::Failed(failure) => writeln!(f, "failed    {}: {}", item.name, failure)?,
            }
            for admin in &item.admins {
                match &admin.outcome {
                    AdminOutcome::Assigned => writeln!(f, "  admin   {}", admin.email)?,
                    AdminOutcome::Failed(failure) => {
                        writeln!(f, "  admin!  {}: {}", admin.email, failure)?
                    }
                }
            }
        }
        let s = self.summary();
        write!(
            f,
            "{} requested, {} created, {} failed; admins: {} assigned, {} failed",
            s.requested, s.created, s.failed, s.admins_assigned, s.admins_failed
        )
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum DeleteOutcome {
    #[serde(rename_all = "camelCase")]
    Deleted { workspace_id: String },
    /// Matched at listing time but the service reported 404 on delete.
    #[serde(rename_all = "camelCase")]
    AlreadyDeleted { workspace_id: String },
    /// No workspace has this name; the reason comes from `WorkspaceError::NotFound`.
    NotFound(Failure),
    /// More than one workspace matched; nothing was deleted.
    #[serde(rename_all = "camelCase")]
    Ambiguous { workspace_ids: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Failed {
        workspace_id: String,
        failure: Failure,
    },
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            DeleteOutcome::Deleted { .. } | DeleteOutcome::AlreadyDeleted { .. }
        )
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItem {
    pub name: String,
    pub outcome: DeleteOutcome,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub requested: Vec<String>,
    pub items: Vec<DeleteItem>,
}

impl DeleteReport {
    pub fn deleted(&self) -> Vec<&str> {
        self.names_where(DeleteOutcome::is_success)
    }

    pub fn not_found(&self) -> Vec<&str> {
        self.names_where(|o| matches!(o, DeleteOutcome::NotFound(_)))
    }

    pub fn failed(&self) -> Vec<&str> {
        self.names_where(|o| {
            matches!(o, DeleteOutcome::Failed { .. } | DeleteOutcome::Ambiguous { .. })
        })
    }

    /// Requested names that resolved to exactly one workspace.
    pub fn matched(&self) -> usize {
        self.items
            .iter()
            .filter(|i| !matches!(i.outcome, DeleteOutcome::NotFound(_) | DeleteOutcome::Ambiguous { .. }))
            .count()
    }

    fn names_where(&self, pred: impl Fn(&DeleteOutcome) -> bool) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| pred(&i.outcome))
            .map(|i| i.name.as_str())
            .collect()
    }
}

impl fmt::Display for DeleteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match &item.outcome {
                DeleteOutcome::Deleted { workspace_id } => {
                    writeln!(f, "deleted   {} ({})", item.name, workspace_id)?
                }
                DeleteOutcome::AlreadyDeleted { workspace_id } => {
                    writeln!(f, "deleted   {} ({}, already gone)", item.name, workspace_id)?
                }
                DeleteOutcome::NotFound(_) => writeln!(f, "not found {}", item.name)?,
                DeleteOutcome::Ambiguous { workspace_ids } => writeln!(
                    f,
                    "skipped   {}: ambiguous, matches {}",
                    item.name,
                    workspace_ids.join(", ")
                )?,
                DeleteOutcome::Failed { workspace_id, failure } => {
                    writeln!(f, "failed    {} ({}): {}", item.name, workspace_id, failure)?
                }
            }
        }
        write!(
            f,
            "{} requested, {} deleted, {} not found, {} failed",
            self.requested.len(),
            self.deleted().len(),
            self.not_found().len(),
            self.failed().len()
        )
    }
}
