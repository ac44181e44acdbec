//! The three PR comment layouts.
//!
//! Templates only concatenate rendered badges and tables into fixed
//! scaffolding. Anything that needs the filesystem (branch lists, row
//! files) is loaded by the caller and passed in.

use crate::errors::RenderError;
use crate::render::badge::UI_ICON;
use crate::render::{BadgeOptions, BadgeRenderer, TableOptions, TableRow, params};

use super::rows::TableFile;

const HEADING: &str = "## 🚀 Quick Actions";

pub const TEST_WORKFLOW: &str = "test.yml";
pub const BACKPORT_WORKFLOW: &str = "backport.yml";
pub const EXAMPLE_WORKFLOW: &str = "workflow.yml";

/// Test suites offered in the `pr_actions` comment.
fn test_rows(renderer: &BadgeRenderer, pr: &str) -> Vec<TableRow> {
    vec![
        TableRow::new("**All**", params([("test_type", "all"), ("from_pr", pr)])),
        TableRow::new("**Unit**", params([("test_type", "unit"), ("from_pr", pr)]))
            .color(renderer.palette().accent.clone()),
        TableRow::new(
            "**Integration**",
            params([("test_type", "integration"), ("from_pr", pr)]),
        ),
    ]
}

fn backport_rows(renderer: &BadgeRenderer, branches: &[String], pr: &str, source: &str) -> Vec<TableRow> {
    branches
        .iter()
        .map(|b| {
            TableRow::new(
                format!("`{}`", b),
                params([
                    ("target_branch", b.as_str()),
                    ("from_pr", pr),
                    ("source_branch", source),
                ]),
            )
            .color(renderer.palette().accent.clone())
        })
        .collect()
}

/// Test and backport actions for a pull request.
///
/// Requires the context to carry both a PR number and a PR branch.
/// `branches` is the (already filtered) list of backport targets; when it is
/// empty the backport table is left out and only the custom badge remains.
pub fn pr_actions(renderer: &BadgeRenderer, branches: &[String]) -> Result<String, RenderError> {
    let ctx = renderer.context();
    let (pr_number, pr_branch) = require_pr(renderer)?;
    let pr = pr_number.to_string();
    let base = ctx.base_branch().to_string();

    let test_table = renderer.table(
        TEST_WORKFLOW,
        &test_rows(renderer, &pr),
        &TableOptions {
            columns: Some(vec!["Test Type".into(), "Actions".into()]),
            git_ref: Some(base.clone()),
            ..Default::default()
        },
    )?;

    let backport_table = renderer.table(
        BACKPORT_WORKFLOW,
        &backport_rows(renderer, branches, &pr, pr_branch),
        &TableOptions {
            columns: Some(vec!["Branch".into(), "Actions".into()]),
            git_ref: Some(base.clone()),
            badge_text: Some("Backport".into()),
            ..Default::default()
        },
    )?;

    let backport_custom = renderer.badge(
        "📦 Backport (Custom)",
        BACKPORT_WORKFLOW,
        &BadgeOptions {
            git_ref: Some(base),
            inputs: params([("from_pr", pr.as_str()), ("source_branch", pr_branch)]),
            color: Some(renderer.palette().custom.clone()),
            icon: Some(UI_ICON.to_string()),
            only_ui: true,
            ..Default::default()
        },
    );

    let mut out = String::new();
    out.push_str(HEADING);
    out.push_str("\n\n### 🧪 Run Tests\n\n");
    out.push_str(test_table.trim_end());
    out.push_str("\n\n### 📦 Backport\n\n");
    if !backport_table.is_empty() {
        out.push_str(backport_table.trim_end());
        out.push_str("\n\n");
    }
    out.push_str("Choose branches to backport manually:\n\n");
    out.push_str(&backport_custom);
    out.push_str(&format!(
        "\n\n{} - immediately runs the workflow with default parameters.\n\n",
        renderer.icon()
    ));
    out.push_str(&format!(
        "{} - opens UI to review and modify parameters before running.\n\n",
        UI_ICON
    ));
    out.push_str("---\n");
    out.push_str("*These links will automatically comment on this PR with the workflow results.*\n\n");
    out.push_str(
        "*Tip: To open links in a new tab, use Ctrl+Click (Windows/Linux) or Cmd+Click (macOS).*",
    );

    Ok(out)
}

/// A single example badge pair.
pub fn simple(renderer: &BadgeRenderer) -> String {
    let badge = renderer.badge(
        "Example",
        EXAMPLE_WORKFLOW,
        &BadgeOptions {
            git_ref: Some(renderer.context().base_branch().to_string()),
            color: Some(renderer.palette().accent.clone()),
            ..Default::default()
        },
    );

    format!("{}\n\n{}\n\n---", HEADING, badge)
}

/// Only a table of badge pairs. With no rows, only the heading is emitted.
pub fn table_only(renderer: &BadgeRenderer, table: &TableFile) -> Result<String, RenderError> {
    let mut opts = table.options();
    if opts.git_ref.is_none() {
        opts.git_ref = Some(renderer.context().base_branch().to_string());
    }
    let rendered = renderer.table(&table.workflow, &table.rows, &opts)?;

    if rendered.is_empty() {
        return Ok(HEADING.to_string());
    }
    Ok(format!("{}\n\n{}", HEADING, rendered.trim_end()))
}

fn require_pr(renderer: &BadgeRenderer) -> Result<(u64, &str), RenderError> {
    let ctx = renderer.context();
    let pr_branch = ctx.pr_branch().ok_or(RenderError::MissingContext {
        template: "pr_actions",
        field: "pr_branch",
    })?;
    let pr_number = ctx.pr_number().ok_or(RenderError::MissingContext {
        template: "pr_actions",
        field: "pr_number",
    })?;
    Ok((pr_number, pr_branch))
}

/// Validate that `pr_actions` can render before any files are loaded.
pub fn check_pr_actions(renderer: &BadgeRenderer) -> Result<(), RenderError> {
    require_pr(renderer).map(|_| ())
}
