//! Markdown tables of badge pairs.
//!
//! ```text
//! | Test Type | Actions |
//! |--------|--------|
//! | **All** | [![▶ All](...)](...) [![⚙️](...)](...) |
//! ```
//!
//! Rows render top to bottom in input order. An empty row list renders to
//! an empty string so callers can drop the surrounding section.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

use super::badge::{BadgeRenderer, BadgeSpec};
use super::params::Params;
use super::placeholder::resolve_params;
use super::trigger::TriggerTarget;
use crate::errors::RenderError;

// Markdown emphasis, stripped in this order: bold, italic, code
static BOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

static ITALIC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Header used when no columns are given.
pub const DEFAULT_COLUMNS: [&str; 2] = ["Label", "Actions"];

const SEPARATOR_CELL: &str = "--------";

/// One table row: a markdown label and the inputs its badges dispatch with.
///
/// Deserializes from `[label]`, `[label, {inputs}]`,
/// `[label, {inputs}, color]` or `{"label", "params", "color"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub params: Params,
    /// Direct badge color; defaults to the palette's direct color.
    pub color: Option<String>,
}

impl TableRow {
    pub fn new(label: impl Into<String>, params: Params) -> Self {
        Self {
            label: label.into(),
            params,
            color: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl<'de> Deserialize<'de> for TableRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawRow {
            Full(String, Params, String),
            WithParams(String, Params),
            LabelOnly((String,)),
            Object {
                label: String,
                #[serde(default)]
                params: Params,
                #[serde(default)]
                color: Option<String>,
            },
        }

        let row = match RawRow::deserialize(deserializer)? {
            RawRow::Full(label, params, color) => TableRow {
                label,
                params,
                color: Some(color),
            },
            RawRow::WithParams(label, params) => TableRow::new(label, params),
            RawRow::LabelOnly((label,)) => TableRow::new(label, Params::new()),
            RawRow::Object {
                label,
                params,
                color,
            } => TableRow {
                label,
                params,
                color,
            },
        };
        Ok(row)
    }
}

/// Options for [`BadgeRenderer::table`].
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Header cells; defaults to [`DEFAULT_COLUMNS`].
    pub columns: Option<Vec<String>>,
    /// Ref for every row; defaults to the base branch.
    pub git_ref: Option<String>,
    /// Badge text for every row instead of the stripped label.
    pub badge_text: Option<String>,
    /// UI badge color; defaults to the palette's UI color.
    pub ui_color: Option<String>,
}

/// Remove `**bold**`, `*italic*` and `` `code` `` markers, then trim.
///
/// The order matters: italic-first would turn `**bold**` into `*bold*`.
pub fn strip_markdown(text: &str) -> String {
    let text = BOLD_REGEX.replace_all(text, "$1");
    let text = ITALIC_REGEX.replace_all(&text, "$1");
    let text = CODE_REGEX.replace_all(&text, "$1");
    text.trim().to_string()
}

/// Render rows through `formatter` into a markdown table.
///
/// Returns an empty string for no rows. Every formatted row must have
/// exactly one cell per header; anything else is rejected before any
/// output is produced.
pub fn render_table<R, S, F>(
    rows: &[R],
    headers: &[S],
    mut formatter: F,
) -> Result<String, RenderError>
where
    S: AsRef<str>,
    F: FnMut(&R) -> Vec<String>,
{
    if rows.is_empty() {
        return Ok(String::new());
    }

    let headers: Vec<&str> = headers.iter().map(|h| h.as_ref()).collect();
    let mut table = format!("| {} |\n", headers.join(" | "));
    table.push('|');
    table.push_str(&vec![SEPARATOR_CELL; headers.len()].join("|"));
    table.push_str("|\n");

    for row in rows {
        let cells = formatter(row);
        if cells.len() != headers.len() {
            return Err(RenderError::CellCountMismatch {
                got: cells.len(),
                expected: headers.len(),
            });
        }
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    Ok(table)
}

impl BadgeRenderer {
    /// Render rows with a caller-supplied formatter that can use this
    /// renderer to build cells.
    pub fn render_table<R, S, F>(
        &self,
        rows: &[R],
        headers: &[S],
        formatter: F,
    ) -> Result<String, RenderError>
    where
        S: AsRef<str>,
        F: Fn(&R, &BadgeRenderer) -> Vec<String>,
    {
        render_table(rows, headers, |row| formatter(row, self))
    }

    /// Render a two-column table: the row label, then a badge pair that
    /// dispatches `workflow_id` with the row's inputs.
    pub fn table(
        &self,
        workflow_id: &str,
        rows: &[TableRow],
        opts: &TableOptions,
    ) -> Result<String, RenderError> {
        let columns: Vec<String> = match &opts.columns {
            Some(columns) if !columns.is_empty() => columns.clone(),
            _ => DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        };
        let git_ref = opts
            .git_ref
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.context().base_branch().to_string());
        let ui_color = opts
            .ui_color
            .clone()
            .unwrap_or_else(|| self.palette().ui.clone());
        let badge_text = opts.badge_text.as_deref().filter(|t| !t.is_empty());

        self.render_table(rows, &columns, |row, renderer| {
            let inputs = resolve_params(&row.params, renderer.context());
            let text = badge_text
                .map(str::to_string)
                .unwrap_or_else(|| strip_markdown(&row.label));
            let color = row
                .color
                .clone()
                .unwrap_or_else(|| renderer.palette().direct.clone());

            let target = TriggerTarget::new(workflow_id)
                .git_ref(git_ref.clone())
                .params(inputs);
            let spec = BadgeSpec::new(text, target)
                .icon(renderer.icon())
                .color(color)
                .style(renderer.style());

            vec![
                row.label.clone(),
                renderer.render_badge_pair(&spec, &ui_color),
            ]
        })
    }
}
