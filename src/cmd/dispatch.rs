//! GitHub API commands — `action-badges dispatch` and `action-badges access`.

use anyhow::Result;

use action_badges::badges_config::BadgesConfig;
use action_badges::github::{self, DispatchRequest};

use super::parse_key_values;

pub async fn cmd_dispatch(
    config: &BadgesConfig,
    owner: &str,
    repo: &str,
    workflow: &str,
    git_ref: &str,
    inputs: &[String],
    user: Option<&str>,
) -> Result<()> {
    let token = github::token_from_env()?;
    let request = DispatchRequest {
        owner: owner.to_string(),
        repo: repo.to_string(),
        workflow_id: workflow.to_string(),
        git_ref: git_ref.to_string(),
        inputs: parse_key_values(inputs)?,
    };

    if config.check_permissions() {
        if !github::check_repository_access(&token, owner, repo).await? {
            anyhow::bail!("No access to repository {}/{}", owner, repo);
        }
        if let Some(user) = user {
            if !github::is_contributor(&token, owner, repo, user).await? {
                anyhow::bail!(
                    "User '{}' is not a contributor to {}/{}",
                    user,
                    owner,
                    repo
                );
            }
        }
    }

    let outcome = github::dispatch_workflow(&token, &request).await?;
    if !outcome.success {
        anyhow::bail!("{} (HTTP {})", outcome.message, outcome.status_code);
    }

    println!("{}", outcome.message);
    if let Some(url) = &outcome.workflow_url {
        println!("Workflow: {}", url);
    }
    match (&outcome.run_id, &outcome.run_url) {
        (Some(id), Some(url)) => println!("Latest run: #{} {}", id, url),
        _ => println!("Latest run: not yet available"),
    }
    Ok(())
}

pub async fn cmd_access(owner: &str, repo: &str, user: Option<&str>) -> Result<()> {
    let token = github::token_from_env()?;

    let has_access = github::check_repository_access(&token, owner, repo).await?;
    println!(
        "Repository {}/{}: {}",
        owner,
        repo,
        if has_access { "accessible" } else { "no access" }
    );

    if let Some(user) = user {
        let contributor = github::is_contributor(&token, owner, repo, user).await?;
        println!(
            "User {}: {}",
            user,
            if contributor {
                "contributor"
            } else {
                "not a contributor"
            }
        );
    }
    Ok(())
}
