//! GitHub REST calls: workflow dispatch and permission checks.
//!
//! Each call is a single request (the contributor check pages through the
//! list). There is no polling and no retry; after a successful dispatch the
//! most recent run is looked up once on a best-effort basis.

use anyhow::Context;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::GitHubError;
use crate::render::Params;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_WEB_BASE: &str = "https://github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = "action-badges";
const CONTRIBUTORS_PER_PAGE: usize = 100;

/// Read the API token from `GITHUB_TOKEN`.
pub fn token_from_env() -> Result<String, GitHubError> {
    std::env::var("GITHUB_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or(GitHubError::MissingToken)
}

/// Body of a `workflow_dispatch` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub inputs: Params,
}

/// A workflow dispatch to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub owner: String,
    pub repo: String,
    /// Workflow file name (e.g. `ci.yml`) or numeric id.
    pub workflow_id: String,
    pub git_ref: String,
    pub inputs: Params,
}

impl DispatchRequest {
    pub fn dispatch_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            GITHUB_API_BASE, self.owner, self.repo, self.workflow_id
        )
    }

    pub fn runs_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs",
            GITHUB_API_BASE, self.owner, self.repo, self.workflow_id
        )
    }

    /// Human-facing page listing runs of this workflow.
    pub fn workflow_page_url(&self) -> String {
        format!(
            "{}/{}/{}/actions/workflows/{}",
            GITHUB_WEB_BASE, self.owner, self.repo, self.workflow_id
        )
    }

    pub fn payload(&self) -> DispatchPayload {
        DispatchPayload {
            git_ref: self.git_ref.clone(),
            inputs: self.inputs.clone(),
        }
    }
}

/// Result of a dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub run_id: Option<u64>,
    pub run_url: Option<String>,
    pub workflow_url: Option<String>,
}

/// A workflow run (subset of fields).
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunsResponse {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

/// A repository contributor (subset of fields).
#[derive(Debug, Deserialize)]
pub struct Contributor {
    pub login: String,
}

/// Extract the `message` field from a GitHub error body, falling back to
/// `fallback` when the body isn't the usual JSON shape.
pub fn error_message(body: &str, fallback: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| fallback.to_string())
}

fn client() -> Result<reqwest::Client, GitHubError> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Dispatch a workflow run.
///
/// An error status from GitHub is reported in the outcome with
/// `success = false`; only transport failures return `Err`.
pub async fn dispatch_workflow(
    token: &str,
    request: &DispatchRequest,
) -> Result<DispatchOutcome, GitHubError> {
    let client = client()?;
    tracing::debug!(
        url = %request.dispatch_url(),
        git_ref = %request.git_ref,
        inputs = request.inputs.len(),
        "dispatching workflow"
    );

    let resp = client
        .post(request.dispatch_url())
        .header("Authorization", format!("token {}", token))
        .header("Accept", GITHUB_ACCEPT)
        .json(&request.payload())
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let fallback = status.canonical_reason().unwrap_or("Unknown error");
        return Ok(DispatchOutcome {
            success: false,
            status_code: status.as_u16(),
            message: format!(
                "Failed to trigger workflow: {}",
                error_message(&body, fallback)
            ),
            run_id: None,
            run_url: None,
            workflow_url: None,
        });
    }

    let run = match latest_run(&client, token, request).await {
        Ok(run) => run,
        Err(e) => {
            tracing::debug!(error = %e, "could not look up the dispatched run");
            None
        }
    };

    Ok(DispatchOutcome {
        success: true,
        status_code: status.as_u16(),
        message: "Workflow triggered successfully".to_string(),
        run_id: run.as_ref().map(|r| r.id),
        run_url: run.map(|r| r.html_url),
        workflow_url: Some(request.workflow_page_url()),
    })
}

/// Most recent run of the requested workflow, if any.
async fn latest_run(
    client: &reqwest::Client,
    token: &str,
    request: &DispatchRequest,
) -> anyhow::Result<Option<WorkflowRun>> {
    let runs: WorkflowRunsResponse = client
        .get(request.runs_url())
        .header("Authorization", format!("token {}", token))
        .header("Accept", GITHUB_ACCEPT)
        .query(&[("per_page", "1")])
        .send()
        .await
        .context("Failed to send workflow runs request to GitHub")?
        .error_for_status()
        .context("GitHub workflow runs API returned error status")?
        .json()
        .await
        .context("Failed to parse workflow runs response from GitHub")?;

    Ok(runs.workflow_runs.into_iter().next())
}

/// Whether `username` appears in the repository's contributor list.
/// Paginates through all pages; a 404 means no access and returns `false`.
pub async fn is_contributor(
    token: &str,
    owner: &str,
    repo: &str,
    username: &str,
) -> Result<bool, GitHubError> {
    let client = client()?;
    let url = format!("{}/repos/{}/{}/contributors", GITHUB_API_BASE, owner, repo);
    let mut page = 1u32;

    loop {
        let resp = client
            .get(&url)
            .header("Authorization", format!("token {}", token))
            .header("Accept", GITHUB_ACCEPT)
            .query(&[
                ("page", page.to_string()),
                ("per_page", CONTRIBUTORS_PER_PAGE.to_string()),
            ])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            tracing::warn!(owner, repo, username, "repository not found or no access");
            return Ok(false);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::Status {
                status,
                message: error_message(&body, "contributors request failed"),
            });
        }

        let contributors: Vec<Contributor> = resp.json().await?;
        if contains_login(&contributors, username) {
            tracing::info!(owner, repo, username, "user is a contributor");
            return Ok(true);
        }

        if contributors.len() < CONTRIBUTORS_PER_PAGE {
            break; // Last page
        }
        page += 1;
    }

    tracing::info!(owner, repo, username, "user is not a contributor");
    Ok(false)
}

/// Case-insensitive login lookup.
pub fn contains_login(contributors: &[Contributor], username: &str) -> bool {
    contributors
        .iter()
        .any(|c| c.login.eq_ignore_ascii_case(username))
}

/// Whether the token can see the repository at all.
pub async fn check_repository_access(
    token: &str,
    owner: &str,
    repo: &str,
) -> Result<bool, GitHubError> {
    let client = client()?;
    let resp = client
        .get(format!("{}/repos/{}/{}", GITHUB_API_BASE, owner, repo))
        .header("Authorization", format!("token {}", token))
        .header("Accept", GITHUB_ACCEPT)
        .send()
        .await?;

    let has_access = resp.status() == StatusCode::OK;
    if has_access {
        tracing::info!(owner, repo, "token has repository access");
    } else {
        tracing::info!(owner, repo, status = resp.status().as_u16(), "token has no repository access");
    }
    Ok(has_access)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::params;

    fn request() -> DispatchRequest {
        DispatchRequest {
            owner: "acme".into(),
            repo: "widgets".into(),
            workflow_id: "test.yml".into(),
            git_ref: "main".into(),
            inputs: params([("test_type", "unit"), ("from_pr", "7")]),
        }
    }

    #[test]
    fn test_dispatch_url() {
        assert_eq!(
            request().dispatch_url(),
            "https://api.github.com/repos/acme/widgets/actions/workflows/test.yml/dispatches"
        );
    }

    #[test]
    fn test_runs_and_page_urls() {
        let r = request();
        assert_eq!(
            r.runs_url(),
            "https://api.github.com/repos/acme/widgets/actions/workflows/test.yml/runs"
        );
        assert_eq!(
            r.workflow_page_url(),
            "https://github.com/acme/widgets/actions/workflows/test.yml"
        );
    }

    #[test]
    fn test_payload_serializes_ref_and_ordered_inputs() {
        let json = serde_json::to_string(&request().payload()).unwrap();
        assert_eq!(
            json,
            r#"{"ref":"main","inputs":{"test_type":"unit","from_pr":"7"}}"#
        );
    }

    #[test]
    fn test_payload_empty_inputs_is_object() {
        let mut r = request();
        r.inputs.clear();
        let json = serde_json::to_value(r.payload()).unwrap();
        assert_eq!(json["inputs"], serde_json::json!({}));
    }

    #[test]
    fn test_error_message_from_json() {
        let body = r#"{"message": "Workflow does not have 'workflow_dispatch' trigger", "documentation_url": "x"}"#;
        assert_eq!(
            error_message(body, "fallback"),
            "Workflow does not have 'workflow_dispatch' trigger"
        );
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message("<html>", "Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("{}", "Not Found"), "Not Found");
    }

    #[test]
    fn test_runs_response_parse() {
        let body = r#"{"total_count": 1, "workflow_runs": [{"id": 99, "html_url": "https://github.com/acme/widgets/actions/runs/99", "status": "queued"}]}"#;
        let runs: WorkflowRunsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(runs.workflow_runs[0].id, 99);
    }

    #[test]
    fn test_runs_response_without_runs() {
        let runs: WorkflowRunsResponse = serde_json::from_str(r#"{"total_count": 0}"#).unwrap();
        assert!(runs.workflow_runs.is_empty());
    }

    #[test]
    fn test_contains_login_case_insensitive() {
        let contributors: Vec<Contributor> =
            serde_json::from_str(r#"[{"login": "Octocat", "id": 1}, {"login": "hubot"}]"#)
                .unwrap();
        assert!(contains_login(&contributors, "octocat"));
        assert!(contains_login(&contributors, "HUBOT"));
        assert!(!contains_login(&contributors, "someone"));
    }
}
