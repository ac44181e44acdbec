//! Table definitions for the `table_only` comment.
//!
//! ```json
//! {
//!   "workflow": "deploy.yml",
//!   "columns": ["Environment", "Actions"],
//!   "ref": "main",
//!   "rows": [
//!     ["**Staging**", {"env": "staging", "pr": "{pr_number}"}],
//!     ["**Production**", {"env": "prod"}, "f44336"]
//!   ]
//! }
//! ```
//!
//! A bare array of rows is accepted too and uses the default workflow.

use serde::Deserialize;
use std::path::Path;

use crate::errors::RenderError;
use crate::render::{TableOptions, TableRow};

/// Workflow used when a rows file doesn't name one.
pub const DEFAULT_TABLE_WORKFLOW: &str = "workflow.yml";

/// A table definition loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableFile {
    #[serde(default = "default_workflow")]
    pub workflow: String,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub badge_text: Option<String>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

fn default_workflow() -> String {
    DEFAULT_TABLE_WORKFLOW.to_string()
}

impl Default for TableFile {
    fn default() -> Self {
        Self {
            workflow: default_workflow(),
            columns: None,
            git_ref: None,
            badge_text: None,
            rows: Vec::new(),
        }
    }
}

impl TableFile {
    /// Parse a table definition (object or bare row array).
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Rows(Vec<TableRow>),
            Table(TableFile),
        }

        Ok(match serde_json::from_str::<Raw>(content)? {
            Raw::Rows(rows) => TableFile {
                rows,
                ..Default::default()
            },
            Raw::Table(table) => table,
        })
    }

    /// Load a table definition from `path`.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path).map_err(|source| RenderError::RowsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| RenderError::RowsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Table options carried by this file.
    pub fn options(&self) -> TableOptions {
        TableOptions {
            columns: self.columns.clone(),
            git_ref: self.git_ref.clone(),
            badge_text: self.badge_text.clone(),
            ui_color: None,
        }
    }
}
