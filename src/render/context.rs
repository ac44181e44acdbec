//! Render context: the repository and pull request a comment is rendered for.
//!
//! The context is captured once from a vars file and then passed by
//! reference into every render call. Nothing here is global.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Default git ref when the vars file does not name one.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Default code host used for pull request return links.
pub const DEFAULT_GITHUB_HOST: &str = "github.com";

/// Contents of a vars JSON file.
///
/// ```json
/// {
///   "app_domain": "https://actions.example.com",
///   "repo_owner": "acme",
///   "repo_name": "widgets",
///   "pr_number": 42,
///   "pr_branch": "feature/x",
///   "base_branch": "main"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vars {
    pub app_domain: String,
    pub repo_owner: String,
    pub repo_name: String,
    /// Accepts either a JSON integer or a numeric string.
    #[serde(default, deserialize_with = "deserialize_pr_number")]
    pub pr_number: Option<u64>,
    #[serde(default)]
    pub pr_branch: Option<String>,
    #[serde(default)]
    pub base_branch: Option<String>,
}

impl Vars {
    /// Load vars from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vars file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse vars file: {}", path.display()))
    }

    /// Parse vars from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid vars JSON")
    }
}

fn deserialize_pr_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Immutable configuration shared by every badge and table in one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    app_domain: String,
    repo_owner: String,
    repo_name: String,
    pr_number: Option<u64>,
    pr_branch: Option<String>,
    base_branch: String,
    github_host: String,
}

impl RenderContext {
    /// Create a context for a repository. Trailing slashes on `app_domain`
    /// are dropped.
    pub fn new(
        app_domain: impl Into<String>,
        repo_owner: impl Into<String>,
        repo_name: impl Into<String>,
    ) -> Self {
        let app_domain: String = app_domain.into();
        Self {
            app_domain: app_domain.trim_end_matches('/').to_string(),
            repo_owner: repo_owner.into(),
            repo_name: repo_name.into(),
            pr_number: None,
            pr_branch: None,
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            github_host: DEFAULT_GITHUB_HOST.to_string(),
        }
    }

    /// Build a context from a loaded vars file.
    pub fn from_vars(vars: &Vars) -> Self {
        let mut ctx = Self::new(&vars.app_domain, &vars.repo_owner, &vars.repo_name);
        ctx.pr_number = vars.pr_number;
        ctx.pr_branch = vars.pr_branch.clone().filter(|b| !b.is_empty());
        if let Some(base) = vars.base_branch.as_deref().filter(|b| !b.is_empty()) {
            ctx.base_branch = base.to_string();
        }
        ctx
    }

    pub fn with_pr_number(mut self, pr_number: u64) -> Self {
        self.pr_number = Some(pr_number);
        self
    }

    pub fn with_pr_branch(mut self, pr_branch: impl Into<String>) -> Self {
        self.pr_branch = Some(pr_branch.into());
        self
    }

    pub fn with_base_branch(mut self, base_branch: impl Into<String>) -> Self {
        self.base_branch = base_branch.into();
        self
    }

    /// Override the code host used in return links (GitHub Enterprise).
    pub fn with_github_host(mut self, host: impl Into<String>) -> Self {
        let host: String = host.into();
        self.github_host = host.trim_end_matches('/').to_string();
        self
    }

    pub fn app_domain(&self) -> &str {
        &self.app_domain
    }

    pub fn repo_owner(&self) -> &str {
        &self.repo_owner
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn pr_number(&self) -> Option<u64> {
        self.pr_number
    }

    pub fn pr_branch(&self) -> Option<&str> {
        self.pr_branch.as_deref()
    }

    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    /// Link back to the pull request, present only when a PR number is set.
    pub fn return_url(&self) -> Option<String> {
        self.pr_number.filter(|n| *n != 0).map(|n| {
            format!(
                "https://{}/{}/{}/pull/{}",
                self.github_host, self.repo_owner, self.repo_name, n
            )
        })
    }
}
