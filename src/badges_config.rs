//! Configuration for badge rendering and workflow dispatch.
//!
//! Settings are read from `.github/configs/badges.toml` when present and
//! layered as file → environment → CLI. Every field has a default, so the
//! file is optional.
//!
//! # Configuration File Format
//!
//! ```toml
//! [palette]
//! direct = "4caf50"
//! ui = "ff9800"
//! accent = "2196f3"
//! custom = "9c27b0"
//!
//! [defaults]
//! style = "flat-square"
//! icon = "▶"
//! branches_file = ".github/configs/backport_branches.json"
//! github_host = "github.com"
//!
//! [access]
//! check_permissions = true
//! branch_filters = ["release-*", "v?"]
//! ```
//!
//! # Environment overrides
//!
//! | Variable                 | Overrides                          |
//! |--------------------------|------------------------------------|
//! | `BADGES_STYLE`           | `defaults.style`                   |
//! | `BADGES_BRANCHES_FILE`   | `defaults.branches_file`           |
//! | `CHECK_PERMISSIONS`      | `access.check_permissions`         |
//! | `BRANCH_FILTER_PATTERNS` | `access.branch_filters` (comma-separated) |

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::render::badge::{DEFAULT_ICON, DEFAULT_STYLE, Palette};
use crate::render::context::DEFAULT_GITHUB_HOST;
use crate::render::{BadgeRenderer, RenderContext};

/// Config file location relative to the project directory.
pub const DEFAULT_CONFIG_PATH: &str = ".github/configs/badges.toml";

/// Backport branch list relative to the project directory.
pub const DEFAULT_BRANCHES_FILE: &str = ".github/configs/backport_branches.json";

static COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// Rendering defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// shields.io style token
    #[serde(default = "default_style")]
    pub style: String,
    /// Icon prefixed to direct badges
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Backport branch list, relative to the project directory
    #[serde(default = "default_branches_file")]
    pub branches_file: PathBuf,
    /// Host used for pull request return links
    #[serde(default = "default_github_host")]
    pub github_host: String,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_branches_file() -> PathBuf {
    PathBuf::from(DEFAULT_BRANCHES_FILE)
}

fn default_github_host() -> String {
    DEFAULT_GITHUB_HOST.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            icon: default_icon(),
            branches_file: default_branches_file(),
            github_host: default_github_host(),
        }
    }
}

/// Who may dispatch, and which branches are offered for backports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Require repository access before dispatching
    #[serde(default = "default_check_permissions")]
    pub check_permissions: bool,
    /// Glob patterns a backport branch must match; empty keeps all
    #[serde(default)]
    pub branch_filters: Vec<String>,
}

fn default_check_permissions() -> bool {
    true
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            check_permissions: default_check_permissions(),
            branch_filters: Vec::new(),
        }
    }
}

/// The complete badges.toml structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BadgesToml {
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub access: AccessConfig,
}

impl BadgesToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse badges.toml")
    }

    /// Load from `path`, or defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize badges.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(style) = lookup("BADGES_STYLE").filter(|s| !s.is_empty()) {
            self.defaults.style = style;
        }
        if let Some(path) = lookup("BADGES_BRANCHES_FILE").filter(|s| !s.is_empty()) {
            self.defaults.branches_file = PathBuf::from(path);
        }
        if let Some(check) = lookup("CHECK_PERMISSIONS") {
            self.access.check_permissions = check.to_lowercase() == "true";
        }
        if let Some(patterns) = lookup("BRANCH_FILTER_PATTERNS").filter(|s| !s.is_empty()) {
            self.access.branch_filters = patterns
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let colors = [
            ("direct", &self.palette.direct),
            ("ui", &self.palette.ui),
            ("accent", &self.palette.accent),
            ("custom", &self.palette.custom),
        ];
        for (name, color) in colors {
            if !COLOR_REGEX.is_match(color) {
                warnings.push(format!(
                    "palette.{} = '{}' is not a hex color; it will be passed to the badge service as-is",
                    name, color
                ));
            }
        }

        if self.defaults.style.trim().is_empty() {
            warnings.push("defaults.style is empty".to_string());
        }

        if self.defaults.github_host.contains("://") {
            warnings.push(format!(
                "defaults.github_host '{}' should be a bare host name without a scheme",
                self.defaults.github_host
            ));
        }

        for pattern in &self.access.branch_filters {
            if pattern.trim().is_empty() {
                warnings.push("access.branch_filters contains an empty pattern".to_string());
            }
        }

        warnings
    }
}

/// Check if a glob pattern matches a branch name.
/// Supports `*` (any sequence) and `?` (any single character),
/// case-insensitively.
pub fn pattern_matches(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let name: Vec<char> = name.to_lowercase().chars().collect();
    glob_match(&pattern, &name)
}

fn glob_match(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => {
            // Skip consecutive stars
            let rest = match rest.iter().position(|c| *c != '*') {
                Some(i) => &rest[i..],
                None => return true,
            };
            (0..=text.len()).any(|i| glob_match(rest, &text[i..]))
        }
        Some(('?', rest)) => !text.is_empty() && glob_match(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && glob_match(rest, &text[1..]),
    }
}

/// Keep branches matching at least one pattern. No patterns keeps all.
pub fn filter_branches(branches: Vec<String>, patterns: &[String]) -> Vec<String> {
    if patterns.is_empty() {
        return branches;
    }
    branches
        .into_iter()
        .filter(|b| patterns.iter().any(|p| pattern_matches(p, b)))
        .collect()
}

/// Resolved configuration: badges.toml plus environment and CLI overrides.
#[derive(Debug, Clone)]
pub struct BadgesConfig {
    /// Directory relative paths are resolved against
    pub project_dir: PathBuf,
    /// Path the TOML was (or would be) loaded from
    pub config_path: PathBuf,
    /// Parsed badges.toml with environment overrides applied
    pub toml: BadgesToml,
    /// CLI override for the branches file
    pub cli_branches_file: Option<PathBuf>,
}

impl BadgesConfig {
    /// Load configuration for a project directory.
    ///
    /// `config_path` defaults to [`DEFAULT_CONFIG_PATH`] under `project_dir`.
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(|| project_dir.join(DEFAULT_CONFIG_PATH));
        let mut toml = BadgesToml::load_or_default(&config_path)?;
        toml.apply_env();
        tracing::debug!(path = %config_path.display(), "loaded badge configuration");

        Ok(Self {
            project_dir,
            config_path,
            toml,
            cli_branches_file: None,
        })
    }

    /// Set the CLI branches-file override.
    pub fn with_branches_file(mut self, path: Option<PathBuf>) -> Self {
        self.cli_branches_file = path;
        self
    }

    /// Branches file (CLI → env → file → default), resolved against the
    /// project directory.
    pub fn branches_file(&self) -> PathBuf {
        let path = self
            .cli_branches_file
            .clone()
            .unwrap_or_else(|| self.toml.defaults.branches_file.clone());
        if path.is_absolute() {
            path
        } else {
            self.project_dir.join(path)
        }
    }

    pub fn check_permissions(&self) -> bool {
        self.toml.access.check_permissions
    }

    pub fn branch_filters(&self) -> &[String] {
        &self.toml.access.branch_filters
    }

    pub fn palette(&self) -> &Palette {
        &self.toml.palette
    }

    /// Build a renderer for `ctx` using the configured palette, style,
    /// icon and host.
    pub fn renderer(&self, ctx: RenderContext) -> BadgeRenderer {
        let ctx = ctx.with_github_host(self.toml.defaults.github_host.clone());
        BadgeRenderer::new(ctx)
            .with_palette(self.toml.palette.clone())
            .with_style(self.toml.defaults.style.clone())
            .with_icon(self.toml.defaults.icon.clone())
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
