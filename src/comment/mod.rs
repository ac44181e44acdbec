//! PR comment assembly.
//!
//! Three comment kinds are supported:
//! - `pr_actions`: test table, backport table and a custom backport badge
//! - `simple`: a single example badge pair
//! - `table_only`: one table, optionally defined by a rows file

pub mod branches;
pub mod rows;
pub mod templates;

use std::path::PathBuf;

pub use branches::{load_branches, parse_branches};
pub use rows::TableFile;

use crate::badges_config::filter_branches;
use crate::errors::RenderError;
use crate::render::BadgeRenderer;

/// Which comment layout to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    PrActions,
    Simple,
    TableOnly,
}

impl CommentKind {
    pub const ALL: [CommentKind; 3] = [
        CommentKind::PrActions,
        CommentKind::Simple,
        CommentKind::TableOnly,
    ];

    /// Template name as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CommentKind::PrActions => "pr_actions",
            CommentKind::Simple => "simple",
            CommentKind::TableOnly => "table_only",
        }
    }
}

impl std::fmt::Display for CommentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CommentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pr_actions" => Ok(CommentKind::PrActions),
            "simple" => Ok(CommentKind::Simple),
            "table_only" => Ok(CommentKind::TableOnly),
            _ => anyhow::bail!(
                "Invalid comment type '{}'. Valid values: pr_actions, simple, table_only",
                s
            ),
        }
    }
}

/// File inputs a comment may need.
#[derive(Debug, Clone, Default)]
pub struct CommentInputs {
    /// Backport branch list, read for `pr_actions`
    pub branches_file: PathBuf,
    /// Glob patterns applied to the branch list
    pub branch_filters: Vec<String>,
    /// Table definition for `table_only`
    pub rows_file: Option<PathBuf>,
}

/// Render one comment.
///
/// Context requirements are checked before any file is read, so a missing
/// PR number fails without touching the branch list.
pub fn render_comment(
    kind: CommentKind,
    renderer: &BadgeRenderer,
    inputs: &CommentInputs,
) -> Result<String, RenderError> {
    match kind {
        CommentKind::PrActions => {
            templates::check_pr_actions(renderer)?;
            let branches = load_branches(&inputs.branches_file)?;
            let branches = filter_branches(branches, &inputs.branch_filters);
            templates::pr_actions(renderer, &branches)
        }
        CommentKind::Simple => Ok(templates::simple(renderer)),
        CommentKind::TableOnly => {
            let table = match &inputs.rows_file {
                Some(path) => TableFile::load(path)?,
                None => TableFile::default(),
            };
            templates::table_only(renderer, &table)
        }
    }
}
