//! Fabric WS Core — workspace provisioning logic for Microsoft Fabric / Power BI.
//!
//! This crate holds everything the `fabric-ws` CLI does, minus argument
//! parsing:
//!
//! - `auth` — OAuth2 client-credentials token acquisition
//! - `api` — the `WorkspaceApi` seam and its Power BI REST implementation
//! - `naming` — base-name x environment expansion and name normalization
//! - `flows` — best-effort create and exact-match delete batches
//! - `report` — ordered per-item outcomes
//!
//! Flows are generic over `WorkspaceApi`, so they can run against an
//! in-memory implementation in tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod models;
pub mod naming;
pub mod report;

// Convenience re-exports
pub use api::{DeleteStatus, PowerBiClient, WorkspaceApi};
pub use auth::{AccessToken, TokenClient};
pub use config::{Config, Credentials};
pub use error::WorkspaceError;
pub use report::{CreateReport, DeleteReport};
