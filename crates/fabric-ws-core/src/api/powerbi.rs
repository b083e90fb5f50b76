//! Power BI REST client for the `groups` (workspaces) endpoints.
//!
//! GET    {base}/groups?$top=N&$skip=M
//! POST   {base}/groups                 {"name", "capacityId"?}
//! DELETE {base}/groups/{id}
//! POST   {base}/groups/{id}/users      {"identifier", "groupUserAccessRight", "principalType"}

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{DeleteStatus, WorkspaceApi};
use crate::auth::AccessToken;
use crate::config::Config;
use crate::error::{extract_error_message, WorkspaceError};
use crate::models::WorkspaceRecord;

#[derive(Debug, Deserialize)]
struct GroupsPage {
    #[serde(default)]
    value: Vec<WorkspaceRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGroupBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacity_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupUserBody<'a> {
    identifier: &'a str,
    group_user_access_right: &'a str,
    principal_type: &'a str,
}

/// Bearer-authorized client for one run.
pub struct PowerBiClient {
    http: reqwest::Client,
    base_url: Url,
    token: AccessToken,
    page_size: u32,
}

impl PowerBiClient {
    pub fn new(config: &Config, token: AccessToken) -> Result<Self, WorkspaceError> {
        let base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(WorkspaceError::Config(format!(
                "API base URL cannot be a base: {}",
                config.api_base_url
            )));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token,
            page_size: config.page_size.max(1),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, WorkspaceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WorkspaceError::Config("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(self.token.secret())
    }

    async fn error_from(response: Response) -> WorkspaceError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        WorkspaceError::api(status, extract_error_message(&body))
    }

    async fn list_page(&self, skip: usize) -> Result<Vec<WorkspaceRecord>, WorkspaceError> {
        let mut url = self.endpoint(&["groups"])?;
        // `$` stays literal; Power BI expects the OData names unescaped.
        url.set_query(Some(&format!("$top={}&$skip={}", self.page_size, skip)));

        let response = self.request(Method::GET, url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let page: GroupsPage = response
            .json()
            .await
            .map_err(|e| WorkspaceError::Decode(format!("groups list: {}", e)))?;
        Ok(page.value)
    }
}

#[async_trait]
impl WorkspaceApi for PowerBiClient {
    async fn list(&self) -> Result<Vec<WorkspaceRecord>, WorkspaceError> {
        let mut all = Vec::new();
        let mut seen = HashSet::new();
        loop {
            let page = self.list_page(all.len()).await?;
            let page_len = page.len();
            let fresh: Vec<_> = page.into_iter().filter(|w| seen.insert(w.id.clone())).collect();
            // A server ignoring $skip would repeat the first page forever.
            if fresh.is_empty() {
                break;
            }
            all.extend(fresh);
            if page_len < self.page_size as usize {
                break;
            }
        }
        tracing::debug!("[PowerBi] Listed {} workspaces", all.len());
        Ok(all)
    }

    async fn create(
        &self,
        name: &str,
        capacity_id: Option<&str>,
    ) -> Result<WorkspaceRecord, WorkspaceError> {
        let url = self.endpoint(&["groups"])?;
        let body = CreateGroupBody { name, capacity_id };
        let response = self.request(Method::POST, url).json(&body).send().await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let value: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| WorkspaceError::Decode(format!("create '{}': {}", name, e)))?;
                let has_id = value
                    .get("id")
                    .and_then(|v| v.as_str())
                    .is_some_and(|id| !id.is_empty());
                if !has_id {
                    return Err(WorkspaceError::Decode(format!(
                        "create '{}': response has no workspace id",
                        name
                    )));
                }
                let mut record: WorkspaceRecord = serde_json::from_value(value)
                    .map_err(|e| WorkspaceError::Decode(format!("create '{}': {}", name, e)))?;
                if record.name.is_empty() {
                    record.name = name.to_string();
                }
                Ok(record)
            }
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn delete(&self, workspace_id: &str) -> Result<DeleteStatus, WorkspaceError> {
        let url = self.endpoint(&["groups", workspace_id])?;
        let response = self.request(Method::DELETE, url).send().await?;

        match response.status() {
            StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => Ok(DeleteStatus::Deleted),
            StatusCode::NOT_FOUND => Ok(DeleteStatus::AlreadyDeleted),
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn add_admin(&self, workspace_id: &str, principal_email: &str) -> Result<(), WorkspaceError> {
        let url = self.endpoint(&["groups", workspace_id, "users"])?;
        let body = GroupUserBody {
            identifier: principal_email,
            group_user_access_right: "Admin",
            principal_type: "User",
        };
        let response = self.request(Method::POST, url).json(&body).send().await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            _ => Err(Self::error_from(response).await),
        }
    }
}
