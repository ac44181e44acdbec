//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module     | Commands handled       |
//! |------------|------------------------|
//! | `comment`  | `Comment`, `Preview`   |
//! | `url`      | `Url`                  |
//! | `dispatch` | `Dispatch`, `Access`   |
//! | `config`   | `Config`               |

pub mod comment;
pub mod config;
pub mod dispatch;
pub mod url;

pub use comment::{cmd_comment, cmd_preview};
pub use config::cmd_config;
pub use dispatch::{cmd_access, cmd_dispatch};
pub use url::cmd_url;

use anyhow::Result;
use std::path::{Path, PathBuf};

use action_badges::badges_config::BadgesConfig;
use action_badges::render::{Params, RenderContext, Vars};

use super::Cli;

/// Load badges.toml (with env overrides) and apply the CLI branches file.
pub fn load_config(
    cli: &Cli,
    project_dir: &Path,
    branches_file: Option<PathBuf>,
) -> Result<BadgesConfig> {
    Ok(BadgesConfig::new(project_dir.to_path_buf(), cli.config.clone())?
        .with_branches_file(branches_file))
}

/// Read the vars file into a render context.
pub fn load_context(vars_path: &Path) -> Result<RenderContext> {
    let vars = Vars::load(vars_path)
        .map_err(|e| anyhow::anyhow!("Error loading vars: {:#}", e))?;
    Ok(RenderContext::from_vars(&vars))
}

/// Parse repeated `KEY=VALUE` arguments, keeping their order. A repeated
/// key keeps its first position and takes the last value.
pub fn parse_key_values(args: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            anyhow::bail!("Invalid parameter '{}'. Expected KEY=VALUE", arg);
        };
        if key.is_empty() {
            anyhow::bail!("Invalid parameter '{}'. Key must not be empty", arg);
        }
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}
