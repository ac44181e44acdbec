//! Comment rendering commands — `action-badges comment` and `action-badges preview`.

use anyhow::{Context, Result};
use std::path::Path;

use action_badges::badges_config::BadgesConfig;
use action_badges::comment::{CommentInputs, CommentKind, render_comment};

use super::load_context;

pub fn cmd_comment(
    config: &BadgesConfig,
    kind: &str,
    vars_path: &Path,
    output: Option<&Path>,
    rows: Option<&Path>,
) -> Result<()> {
    let kind: CommentKind = kind.parse()?;
    let ctx = load_context(vars_path)?;
    let renderer = config.renderer(ctx);

    let inputs = CommentInputs {
        branches_file: config.branches_file(),
        branch_filters: config.branch_filters().to_vec(),
        rows_file: rows.map(Path::to_path_buf),
    };
    let markdown = render_comment(kind, &renderer, &inputs)
        .map_err(|e| anyhow::anyhow!("Error generating comment: {}", e))?;

    match output {
        Some(path) => {
            write_markdown(path, &markdown)?;
            eprintln!("Wrote {} comment to {}", kind, path.display());
        }
        None => println!("{}", markdown),
    }
    Ok(())
}

/// Render every comment kind from one vars file into `out_dir`.
pub fn cmd_preview(config: &BadgesConfig, vars_path: &Path, out_dir: &Path) -> Result<()> {
    let ctx = load_context(vars_path)?;
    let renderer = config.renderer(ctx);
    let inputs = CommentInputs {
        branches_file: config.branches_file(),
        branch_filters: config.branch_filters().to_vec(),
        rows_file: None,
    };

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    for kind in CommentKind::ALL {
        let markdown = render_comment(kind, &renderer, &inputs)
            .map_err(|e| anyhow::anyhow!("Error generating comment: {}", e))?;
        let path = out_dir.join(format!("preview_{}.md", kind));
        write_markdown(&path, &markdown)?;
        println!("Generated: {}", path.display());
    }
    Ok(())
}

fn write_markdown(path: &Path, markdown: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, markdown)
        .with_context(|| format!("Failed to write comment to {}", path.display()))
}
