use serde::{Deserialize, Serialize};

/// Deployment stage a workspace is provisioned for.
///
/// Declaration order is the canonical expansion order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Dev,
    Uat,
    Prd,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Dev, Environment::Uat, Environment::Prd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "DEV",
            Self::Uat => "UAT",
            Self::Prd => "PRD",
        }
    }

    /// Lowercase suffix appended to a base name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Uat => "uat",
            Self::Prd => "prd",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEV" => Some(Self::Dev),
            "UAT" => Some(Self::Uat),
            "PRD" | "PROD" => Some(Self::Prd),
            _ => None,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One workspace to create: a base name paired with an environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRequest {
    pub base_name: String,
    pub environment: Environment,
}

impl WorkspaceRequest {
    pub fn new(base_name: impl Into<String>, environment: Environment) -> Self {
        Self {
            base_name: base_name.into(),
            environment,
        }
    }

    /// `"{base_name} {environment}"` with the environment in lowercase.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.base_name, self.environment.suffix())
    }
}

/// A workspace as returned by the Power BI `groups` API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_on_dedicated_capacity: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl WorkspaceRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity_id: None,
            is_on_dedicated_capacity: None,
            kind: None,
        }
    }
}

/// An admin grant applied to a freshly created workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminAssignment {
    pub workspace_id: String,
    pub principal_email: String,
}
