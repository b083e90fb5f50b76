//! OAuth2 client-credentials token acquisition against the Microsoft identity
//! platform. One token per process; nothing is cached or refreshed.

use chrono::{DateTime, Duration, Utc};
use reqwest::header;
use serde::Deserialize;

use crate::config::{Config, Secret};
use crate::error::{extract_error_message, WorkspaceError};

const DEFAULT_EXPIRY_SECS: i64 = 3600;

/// Bearer token returned by the token endpoint.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: Secret,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: Secret::new(secret),
            token_type: "Bearer".to_string(),
            expires_at,
        }
    }

    pub fn secret(&self) -> &str {
        self.secret.expose()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// `now + expires_in` seconds, or `None` when the sum is out of range.
fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    Duration::try_seconds(expires_in).and_then(|d| now.checked_add_signed(d))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Client for the `/{tenant}/oauth2/v2.0/token` endpoint.
pub struct TokenClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: Secret,
    scope: String,
}

impl TokenClient {
    pub fn new(config: &Config) -> Result<Self, WorkspaceError> {
        let token_url = config.token_url();
        url::Url::parse(&token_url)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            token_url,
            client_id: config.credentials.client_id.clone(),
            client_secret: config.credentials.client_secret.clone(),
            scope: config.scope.clone(),
        })
    }

    /// Run the client-credentials grant. Every failure is an `Auth` error.
    pub async fn acquire(&self) -> Result<AccessToken, WorkspaceError> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose()),
            ("scope", self.scope.as_str()),
            ("grant_type", "client_credentials"),
        ];

        tracing::debug!("[Auth] Requesting token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .header(header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| WorkspaceError::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::error!("[Auth] Authentication failed: {} - {}", status.as_u16(), message);
            return Err(WorkspaceError::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        let payload: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| WorkspaceError::Auth(format!("invalid token response: {}", e)))?;
        if payload.access_token.is_empty() {
            return Err(WorkspaceError::Auth(
                "missing access_token in token response".to_string(),
            ));
        }

        let expires_in = payload.expires_in.unwrap_or(DEFAULT_EXPIRY_SECS).max(1);
        let expires_at = expiry_from(Utc::now(), expires_in).ok_or_else(|| {
            WorkspaceError::Auth(format!("invalid expires_in in token response: {}", expires_in))
        })?;
        let mut token = AccessToken::new(payload.access_token, expires_at);
        if let Some(token_type) = payload.token_type {
            token.token_type = token_type;
        }

        tracing::info!("[Auth] Authentication successful (expires in {}s)", expires_in);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_hides_secret() {
        let token = AccessToken::new("eyJ0eXAi", Utc::now());
        assert!(!format!("{:?}", token).contains("eyJ0eXAi"));
        assert_eq!(token.secret(), "eyJ0eXAi");
    }

    #[test]
    fn test_token_expiry() {
        let now = Utc::now();
        let token = AccessToken::new("t", now + Duration::seconds(60));
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::seconds(61)));
    }

    #[test]
    fn test_expiry_out_of_range() {
        let now = Utc::now();
        assert_eq!(expiry_from(now, 60), Some(now + Duration::seconds(60)));
        assert_eq!(expiry_from(now, i64::MAX), None);
    }
}
