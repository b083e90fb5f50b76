//! Workspace API seam.
//!
//! The flows only talk to [`WorkspaceApi`]; [`PowerBiClient`] is the HTTP
//! implementation used by the CLI.

pub mod powerbi;

use async_trait::async_trait;

use crate::error::WorkspaceError;
use crate::models::WorkspaceRecord;

pub use powerbi::PowerBiClient;

/// Result of a successful delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    /// The service answered 404: the workspace was already gone.
    AlreadyDeleted,
}

#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// Every workspace visible to the authenticated principal.
    async fn list(&self) -> Result<Vec<WorkspaceRecord>, WorkspaceError>;

    async fn create(
        &self,
        name: &str,
        capacity_id: Option<&str>,
    ) -> Result<WorkspaceRecord, WorkspaceError>;

    async fn delete(&self, workspace_id: &str) -> Result<DeleteStatus, WorkspaceError>;

    /// Grant `Admin` on the workspace to a user principal.
    async fn add_admin(&self, workspace_id: &str, principal_email: &str) -> Result<(), WorkspaceError>;
}
