//! Trigger URL construction.
//!
//! A trigger URL points at the dispatch service's `/workflow/trigger`
//! endpoint. Query keys are emitted in a fixed order:
//!
//! 1. `owner`, `repo`, `workflow_id`, `ref`
//! 2. workflow inputs, in insertion order
//! 3. `return_url` (explicit value, else the context's PR link)
//! 4. `ui=true` for [`LinkStyle::Ui`]
//! 5. extra overrides, which may replace any key above
//!
//! A replaced key keeps the position it was first written at.

use serde::{Deserialize, Serialize};

use super::context::RenderContext;
use super::params::{Params, encode_query};

/// Path of the trigger endpoint on the dispatch service.
pub const TRIGGER_PATH: &str = "/workflow/trigger";

/// How a badge link behaves when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// Dispatch immediately with the given inputs.
    #[default]
    Direct,
    /// Open a review form before dispatching.
    Ui,
}

impl std::fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStyle::Direct => write!(f, "direct"),
            LinkStyle::Ui => write!(f, "ui"),
        }
    }
}

impl std::str::FromStr for LinkStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(LinkStyle::Direct),
            "ui" => Ok(LinkStyle::Ui),
            _ => anyhow::bail!("Invalid link style '{}'. Valid values: direct, ui", s),
        }
    }
}

/// Everything the dispatch service needs to run one workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerTarget {
    /// Workflow file name (e.g. `test.yml`) or numeric workflow id.
    pub workflow_id: String,
    pub link_style: LinkStyle,
    /// Git ref to run on; `None` or empty means the context's base branch.
    pub git_ref: Option<String>,
    /// Workflow inputs, already placeholder-resolved.
    pub params: Params,
    /// Explicit return link; falls back to the context's PR link.
    pub return_url: Option<String>,
    /// Applied last; may override any other query key.
    pub extra: Params,
}

impl TriggerTarget {
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            ..Default::default()
        }
    }

    pub fn link_style(mut self, link_style: LinkStyle) -> Self {
        self.link_style = link_style;
        self
    }

    pub fn git_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The ref this target runs on, after applying the context default.
    pub fn effective_ref<'a>(&'a self, ctx: &'a RenderContext) -> &'a str {
        self.git_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| ctx.base_branch())
    }

    /// Ordered query parameters for this target.
    pub fn query_params(&self, ctx: &RenderContext) -> Params {
        let mut query = Params::new();
        query.insert("owner".into(), ctx.repo_owner().to_string());
        query.insert("repo".into(), ctx.repo_name().to_string());
        query.insert("workflow_id".into(), self.workflow_id.clone());
        query.insert("ref".into(), self.effective_ref(ctx).to_string());

        for (k, v) in &self.params {
            query.insert(k.clone(), v.clone());
        }

        let return_url = self
            .return_url
            .clone()
            .filter(|u| !u.is_empty())
            .or_else(|| ctx.return_url());
        if let Some(url) = return_url {
            query.insert("return_url".into(), url);
        }

        if self.link_style == LinkStyle::Ui {
            query.insert("ui".into(), "true".into());
        }

        for (k, v) in &self.extra {
            query.insert(k.clone(), v.clone());
        }

        query
    }
}

/// Build the trigger URL for `target`.
///
/// Never fails. An empty workflow id is passed through to the URL and
/// logged, since the dispatch service will reject it.
pub fn build_trigger_url(ctx: &RenderContext, target: &TriggerTarget) -> String {
    if target.workflow_id.trim().is_empty() {
        tracing::warn!(
            owner = ctx.repo_owner(),
            repo = ctx.repo_name(),
            "building trigger URL with an empty workflow id"
        );
    }

    format!(
        "{}{}?{}",
        ctx.app_domain(),
        TRIGGER_PATH,
        encode_query(&target.query_params(ctx))
    )
}
