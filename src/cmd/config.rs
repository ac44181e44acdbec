//! Configuration view and validation commands — `action-badges config`.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::super::ConfigCommands;

pub fn cmd_config(
    project_dir: &Path,
    config_path: Option<PathBuf>,
    command: Option<ConfigCommands>,
) -> Result<()> {
    use action_badges::badges_config::{BadgesConfig, BadgesToml, DEFAULT_CONFIG_PATH};

    let config_path = config_path.unwrap_or_else(|| project_dir.join(DEFAULT_CONFIG_PATH));

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Badge Configuration");
            println!("===================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
                println!();
                print_toml(&BadgesToml::load(&config_path)?);
            } else {
                println!("No badges.toml found at {}", config_path.display());
                println!();
                println!("Using default configuration:");
                print_toml(&BadgesToml::default());
                println!("Run 'action-badges config init' to create a badges.toml file.");
                println!();
            }

            // Show effective values (including env overrides)
            let config = BadgesConfig::new(project_dir.to_path_buf(), Some(config_path))?;
            println!("Effective values (with env overrides):");
            println!("  style = \"{}\"", config.toml.defaults.style);
            println!("  branches_file = \"{}\"", config.branches_file().display());
            println!("  check_permissions = {}", config.check_permissions());
            println!("  branch_filters = {:?}", config.branch_filters());
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No badges.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = BadgesToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("badges.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            BadgesToml::default().save(&config_path)?;

            println!("Created badges.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [palette] direct, ui, accent, custom");
            println!("  - [defaults] style, icon, branches_file, github_host");
            println!("  - [access] check_permissions, branch_filters");
            println!();
        }
    }

    Ok(())
}

fn print_toml(toml: &action_badges::badges_config::BadgesToml) {
    println!("[palette]");
    println!("  direct = \"{}\"", toml.palette.direct);
    println!("  ui = \"{}\"", toml.palette.ui);
    println!("  accent = \"{}\"", toml.palette.accent);
    println!("  custom = \"{}\"", toml.palette.custom);
    println!();

    println!("[defaults]");
    println!("  style = \"{}\"", toml.defaults.style);
    println!("  icon = \"{}\"", toml.defaults.icon);
    println!(
        "  branches_file = \"{}\"",
        toml.defaults.branches_file.display()
    );
    println!("  github_host = \"{}\"", toml.defaults.github_host);
    println!();

    println!("[access]");
    println!("  check_permissions = {}", toml.access.check_permissions);
    if !toml.access.branch_filters.is_empty() {
        println!("  branch_filters = {:?}", toml.access.branch_filters);
    }
    println!();
}
