//! Backport branch list loading.
//!
//! The file is either a bare JSON array or an object with a `branches` key:
//!
//! ```json
//! ["release-1.0", "release-2.0"]
//! {"branches": ["release-1.0", "release-2.0"]}
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::errors::RenderError;

#[derive(Deserialize)]
#[serde(untagged)]
enum BranchList {
    Bare(Vec<String>),
    Wrapped {
        #[serde(default)]
        branches: Vec<String>,
    },
}

impl From<BranchList> for Vec<String> {
    fn from(list: BranchList) -> Self {
        match list {
            BranchList::Bare(branches) | BranchList::Wrapped { branches } => branches,
        }
    }
}

/// Parse a branch list from JSON text.
pub fn parse_branches(content: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str::<BranchList>(content).map(Into::into)
}

/// Load the ordered branch list from `path`.
pub fn load_branches(path: &Path) -> Result<Vec<String>, RenderError> {
    let content = std::fs::read_to_string(path).map_err(|source| RenderError::BranchesRead {
        path: path.to_path_buf(),
        source,
    })?;
    let branches = parse_branches(&content).map_err(|source| RenderError::BranchesParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), count = branches.len(), "loaded backport branches");
    Ok(branches)
}
