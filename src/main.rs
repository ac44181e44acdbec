use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "action-badges")]
#[command(version, about = "Render GitHub Actions trigger badges for PR comments")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to badges.toml (defaults to .github/configs/badges.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a PR comment (pr_actions, simple, table_only)
    Comment {
        /// Comment template
        kind: String,

        /// Vars JSON with app_domain, repo_owner, repo_name and PR fields
        #[arg(long, default_value = "vars.json")]
        vars: PathBuf,

        /// Write the comment here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Backport branch list (overrides badges.toml)
        #[arg(long)]
        branches_file: Option<PathBuf>,

        /// Table definition for table_only
        #[arg(long)]
        rows: Option<PathBuf>,
    },
    /// Render every template into preview_*.md files
    Preview {
        #[arg(long, default_value = "vars.json")]
        vars: PathBuf,

        /// Directory the preview files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[arg(long)]
        branches_file: Option<PathBuf>,
    },
    /// Print the trigger URL for one workflow
    Url {
        /// Workflow file name or id
        workflow: String,

        #[arg(long, default_value = "vars.json")]
        vars: PathBuf,

        /// Git ref (defaults to the base branch)
        #[arg(long = "ref")]
        git_ref: Option<String>,

        /// Link to the parameter form instead of running directly
        #[arg(long)]
        ui: bool,

        /// Workflow input as key=value (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    /// Dispatch a workflow through the GitHub API (needs GITHUB_TOKEN)
    Dispatch {
        #[arg(long)]
        owner: String,

        #[arg(long)]
        repo: String,

        #[arg(long)]
        workflow: String,

        #[arg(long = "ref", default_value = "main")]
        git_ref: String,

        /// Workflow input as key=value (repeatable)
        #[arg(long = "input", value_name = "KEY=VALUE")]
        inputs: Vec<String>,

        /// Require this user to be a contributor before dispatching
        #[arg(long)]
        user: Option<String>,
    },
    /// Check repository access and, optionally, contributor status
    Access {
        #[arg(long)]
        owner: String,

        #[arg(long)]
        repo: String,

        #[arg(long)]
        user: Option<String>,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default badges.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Comment {
            kind,
            vars,
            output,
            branches_file,
            rows,
        } => {
            let config = cmd::load_config(&cli, &project_dir, branches_file.clone())?;
            cmd::cmd_comment(
                &config,
                kind,
                vars,
                output.as_deref(),
                rows.as_deref(),
            )?;
        }
        Commands::Preview {
            vars,
            out_dir,
            branches_file,
        } => {
            let config = cmd::load_config(&cli, &project_dir, branches_file.clone())?;
            cmd::cmd_preview(&config, vars, out_dir)?;
        }
        Commands::Url {
            workflow,
            vars,
            git_ref,
            ui,
            params,
        } => {
            let config = cmd::load_config(&cli, &project_dir, None)?;
            cmd::cmd_url(&config, workflow, vars, git_ref.as_deref(), *ui, params)?;
        }
        Commands::Dispatch {
            owner,
            repo,
            workflow,
            git_ref,
            inputs,
            user,
        } => {
            let config = cmd::load_config(&cli, &project_dir, None)?;
            cmd::cmd_dispatch(
                &config,
                owner,
                repo,
                workflow,
                git_ref,
                inputs,
                user.as_deref(),
            )
            .await?;
        }
        Commands::Access { owner, repo, user } => {
            cmd::cmd_access(owner, repo, user.as_deref()).await?;
        }
        Commands::Config { command } => {
            cmd::cmd_config(&project_dir, cli.config.clone(), command.clone())?
        }
    }

    Ok(())
}
