//! Core error type for workspace provisioning.
//!
//! `WorkspaceError` is shared by the auth client, the Power BI client and the
//! batch flows. Fatal kinds (`Auth`, `Validation`, `Config`) abort a run before
//! any report is produced; the rest are recorded per item.

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl WorkspaceError {
    pub(crate) fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Errors that stop the whole run instead of being recorded per item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WorkspaceError::Auth(_) | WorkspaceError::Validation(_) | WorkspaceError::Config(_)
        )
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            WorkspaceError::Api { status, .. } => Some(*status),
            WorkspaceError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<url::ParseError> for WorkspaceError {
    fn from(err: url::ParseError) -> Self {
        WorkspaceError::Config(format!("invalid URL: {err}"))
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Power BI wraps errors as `{"error": {"code": ..., "message": ...}}` and the
/// identity platform uses `{"error": ..., "error_description": ...}`. Falls
/// back to the raw body.
pub fn extract_error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        if let Some(desc) = value.get("error_description").and_then(|v| v.as_str()) {
            return Some(desc.to_string());
        }
        let error = value.get("error")?;
        if let Some(s) = error.as_str() {
            return Some(s.to_string());
        }
        error
            .get("message")
            .and_then(|v| v.as_str())
            .or_else(|| error.get("code").and_then(|v| v.as_str()))
            .map(|s| s.to_string())
            .or_else(|| Some(error.to_string()))
    });

    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_powerbi_envelope() {
        let body = r#"{"error":{"code":"PowerBIEntityAlreadyExists","message":"Workspace exists"}}"#;
        assert_eq!(extract_error_message(body), "Workspace exists");
    }

    #[test]
    fn test_extract_code_only() {
        let body = r#"{"error":{"code":"PowerBINotAuthorizedException"}}"#;
        assert_eq!(extract_error_message(body), "PowerBINotAuthorizedException");
    }

    #[test]
    fn test_extract_identity_error() {
        let body = r#"{"error":"invalid_client","error_description":"AADSTS7000215: Invalid client secret"}"#;
        assert_eq!(
            extract_error_message(body),
            "AADSTS7000215: Invalid client secret"
        );
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        assert_eq!(extract_error_message("  Too Many Requests \n"), "Too Many Requests");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(WorkspaceError::Auth("x".into()).is_fatal());
        assert!(WorkspaceError::Validation("x".into()).is_fatal());
        assert!(!WorkspaceError::api(409, "exists").is_fatal());
        assert!(!WorkspaceError::NotFound("x".into()).is_fatal());
        assert_eq!(WorkspaceError::api(429, "slow down").status(), Some(429));
    }
}
