//! Typed error hierarchy for action-badges.
//!
//! Two top-level enums cover the two subsystems:
//! - `RenderError`: badge, table and comment rendering failures
//! - `GitHubError`: workflow dispatch and permission-check failures

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the rendering subsystem.
///
/// Every variant is a configuration error: rendering either produces the
/// full markdown or fails before emitting anything.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{field} is required for the {template} template")]
    MissingContext {
        template: &'static str,
        field: &'static str,
    },

    #[error("Row formatter returned {got} cells, expected {expected}")]
    CellCountMismatch { got: usize, expected: usize },

    #[error("Failed to read branches file at {path}: {source}")]
    BranchesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse branches file at {path}: {source}")]
    BranchesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read rows file at {path}: {source}")]
    RowsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rows file at {path}: {source}")]
    RowsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the GitHub REST collaborator.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GITHUB_TOKEN must be set to call the GitHub API")]
    MissingToken,

    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    Status { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_context_names_field_and_template() {
        let err = RenderError::MissingContext {
            template: "pr_actions",
            field: "pr_number",
        };
        let msg = err.to_string();
        assert!(msg.contains("pr_number"));
        assert!(msg.contains("pr_actions"));
    }

    #[test]
    fn cell_count_mismatch_carries_counts() {
        let err = RenderError::CellCountMismatch {
            got: 3,
            expected: 2,
        };
        match &err {
            RenderError::CellCountMismatch { got, expected } => {
                assert_eq!(*got, 3);
                assert_eq!(*expected, 2);
            }
            _ => panic!("Expected CellCountMismatch"),
        }
        assert_eq!(
            err.to_string(),
            "Row formatter returned 3 cells, expected 2"
        );
    }

    #[test]
    fn branches_read_carries_path() {
        let path = PathBuf::from("/repo/.github/configs/backport_branches.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = RenderError::BranchesRead {
            path: path.clone(),
            source: io_err,
        };
        match &err {
            RenderError::BranchesRead { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected BranchesRead"),
        }
    }

    #[test]
    fn github_status_error_is_matchable() {
        let err = GitHubError::Status {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(matches!(err, GitHubError::Status { status: 404, .. }));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&RenderError::CellCountMismatch {
            got: 1,
            expected: 2,
        });
        assert_std_error(&GitHubError::MissingToken);
    }
}
