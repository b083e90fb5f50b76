//! Workspace name handling: list parsing, normalization and expansion of
//! base names into per-environment workspace requests.

use std::collections::HashSet;

use crate::error::WorkspaceError;
use crate::models::{Environment, WorkspaceRequest};

/// Split a comma-separated input into trimmed, non-empty entries.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized form used for every name comparison.
///
/// Trims, collapses internal whitespace runs to a single space and lowercases.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drop entries whose normalized form was already seen, keeping first occurrence.
pub fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(normalize_name(name)))
        .collect()
}

/// Expand base names x environments into workspace requests.
///
/// Base-name order is preserved; environments always come out in
/// DEV, UAT, PRD order regardless of how they were selected.
pub fn expand(
    base_names: &[String],
    environments: &[Environment],
) -> Result<Vec<WorkspaceRequest>, WorkspaceError> {
    let bases: Vec<&str> = base_names
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if bases.is_empty() {
        return Err(WorkspaceError::Validation(
            "no workspace names provided".to_string(),
        ));
    }

    let mut envs = environments.to_vec();
    envs.sort();
    envs.dedup();
    if envs.is_empty() {
        return Err(WorkspaceError::Validation(
            "no environments selected (DEV/UAT/PRD)".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut requests = Vec::with_capacity(bases.len() * envs.len());
    for base in bases {
        for env in &envs {
            let request = WorkspaceRequest::new(base, *env);
            let full_name = request.full_name();
            if !seen.insert(normalize_name(&full_name)) {
                return Err(WorkspaceError::Validation(format!(
                    "workspace name '{}' is produced more than once",
                    full_name
                )));
            }
            requests.push(request);
        }
    }
    Ok(requests)
}
