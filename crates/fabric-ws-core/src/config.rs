//! Run configuration.
//!
//! `Config` is assembled once at process start (CLI flags, environment
//! variables, optional `.env`) and handed to the flows read-only.

use std::time::Duration;

use crate::error::WorkspaceError;
use crate::models::Environment;

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.powerbi.com/v1.0/myorg";
pub const DEFAULT_SCOPE: &str = "https://analysis.windows.net/powerbi/api/.default";
pub const DEFAULT_PAGE_SIZE: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A secret string whose `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Service-principal credentials for the client-credentials grant.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Secret,
}

impl Credentials {
    /// Build credentials from optional inputs, naming every missing one.
    pub fn from_parts(
        tenant_id: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self, WorkspaceError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        let mut missing = Vec::new();
        if !present(&tenant_id) {
            missing.push("AZURE_TENANT_ID");
        }
        if !present(&client_id) {
            missing.push("AZURE_CLIENT_ID");
        }
        if !present(&client_secret) {
            missing.push("AZURE_CLIENT_SECRET");
        }
        if !missing.is_empty() {
            return Err(WorkspaceError::Validation(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            tenant_id: tenant_id.unwrap_or_default().trim().to_string(),
            client_id: client_id.unwrap_or_default().trim().to_string(),
            client_secret: Secret::new(client_secret.unwrap_or_default()),
        })
    }
}

/// Immutable settings shared by the auth client, API client and flows.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Identity platform host, e.g. `https://login.microsoftonline.com`
    pub authority_host: String,
    /// Power BI REST base, e.g. `https://api.powerbi.com/v1.0/myorg`
    pub api_base_url: String,
    pub scope: String,
    pub timeout: Duration,
    /// Capacity to bind new workspaces to
    pub capacity_id: Option<String>,
    /// Users granted Admin on each created workspace
    pub admin_emails: Vec<String>,
    /// `$top` used when listing workspaces
    pub page_size: u32,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capacity_id: None,
            admin_emails: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = host.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Blank capacity ids are treated as unset.
    pub fn with_capacity_id(mut self, capacity_id: Option<String>) -> Self {
        self.capacity_id = capacity_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    pub fn with_admin_emails(mut self, emails: Vec<String>) -> Self {
        self.admin_emails = emails;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Token endpoint for the configured tenant.
    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            self.credentials.tenant_id
        )
    }
}

/// Interpret a CI boolean input. Accepts `true`, `1`, `yes`, `on` in any case.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Environments whose selector flag is set, in canonical order.
pub fn selected_environments(dev: bool, uat: bool, prd: bool) -> Vec<Environment> {
    Environment::ALL
        .into_iter()
        .zip([dev, uat, prd])
        .filter_map(|(env, on)| on.then_some(env))
        .collect()
}
