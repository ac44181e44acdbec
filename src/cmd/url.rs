//! Trigger URL printing — `action-badges url`.

use anyhow::Result;
use std::path::Path;

use action_badges::badges_config::BadgesConfig;
use action_badges::render::{LinkStyle, TriggerTarget, resolve_params};

use super::{load_context, parse_key_values};

pub fn cmd_url(
    config: &BadgesConfig,
    workflow: &str,
    vars_path: &Path,
    git_ref: Option<&str>,
    ui: bool,
    params: &[String],
) -> Result<()> {
    let ctx = load_context(vars_path)?;
    let renderer = config.renderer(ctx);
    let params = resolve_params(&parse_key_values(params)?, renderer.context());

    let mut target = TriggerTarget::new(workflow).params(params);
    if let Some(r) = git_ref {
        target = target.git_ref(r);
    }
    if ui {
        target = target.link_style(LinkStyle::Ui);
    }

    println!("{}", renderer.trigger_url(&target));
    Ok(())
}
