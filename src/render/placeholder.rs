//! Placeholder tokens that can appear inside workflow input values.
//!
//! A value such as `"pr-{pr_number}-{base_branch}"` is resolved against the
//! render context right before a badge is built. Tokens are matched as
//! literal text anywhere in the value and every occurrence is replaced.

use regex::Regex;
use std::sync::LazyLock;

use super::context::RenderContext;
use super::params::Params;

// Anything shaped like a token that survived resolution
static LEFTOVER_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[a-z_]+\}").unwrap());

/// The closed set of substitutable tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderToken {
    /// `{pr_number}`: the pull request number.
    PrNumber,
    /// `{pr_branch}`: the PR head branch, falling back to the base branch.
    PrBranch,
    /// `{base_branch}`: the base branch.
    BaseBranch,
}

impl PlaceholderToken {
    /// All tokens, in resolution order.
    pub const ALL: [PlaceholderToken; 3] = [
        PlaceholderToken::PrNumber,
        PlaceholderToken::PrBranch,
        PlaceholderToken::BaseBranch,
    ];

    /// Literal token text as written in input values.
    pub fn token(self) -> &'static str {
        match self {
            PlaceholderToken::PrNumber => "{pr_number}",
            PlaceholderToken::PrBranch => "{pr_branch}",
            PlaceholderToken::BaseBranch => "{base_branch}",
        }
    }

    /// Value this token resolves to, or `None` when the context has nothing
    /// to substitute (the token is then left in place).
    pub fn resolve(self, ctx: &RenderContext) -> Option<String> {
        match self {
            PlaceholderToken::PrNumber => ctx.pr_number().map(|n| n.to_string()),
            PlaceholderToken::PrBranch => Some(
                ctx.pr_branch()
                    .unwrap_or_else(|| ctx.base_branch())
                    .to_string(),
            ),
            PlaceholderToken::BaseBranch => Some(ctx.base_branch().to_string()),
        }
    }
}

impl std::fmt::Display for PlaceholderToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for PlaceholderToken {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlaceholderToken::ALL
            .into_iter()
            .find(|t| t.token() == s)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown placeholder '{}'. Valid values: {{pr_number}}, {{pr_branch}}, {{base_branch}}",
                    s
                )
            })
    }
}

/// Replace every known token in `value`.
pub fn resolve_placeholders(value: &str, ctx: &RenderContext) -> String {
    let mut resolved = value.to_string();
    for token in PlaceholderToken::ALL {
        if !resolved.contains(token.token()) {
            continue;
        }
        if let Some(replacement) = token.resolve(ctx) {
            resolved = resolved.replace(token.token(), &replacement);
        }
    }

    if let Some(m) = LEFTOVER_TOKEN_REGEX.find(&resolved) {
        tracing::warn!(value = %value, token = m.as_str(), "unresolved placeholder left in input value");
    }

    resolved
}

/// Resolve placeholders in every value of a parameter map, keeping key order.
pub fn resolve_params(params: &Params, ctx: &RenderContext) -> Params {
    params
        .iter()
        .map(|(k, v)| (k.clone(), resolve_placeholders(v, ctx)))
        .collect()
}
