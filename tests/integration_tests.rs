//! Integration tests for action-badges
//!
//! These tests drive the binary against temporary project directories.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create an action-badges Command with a clean environment
fn badges() -> Command {
    let mut cmd = cargo_bin_cmd!("action-badges");
    for var in [
        "BADGES_STYLE",
        "BADGES_BRANCHES_FILE",
        "CHECK_PERMISSIONS",
        "BRANCH_FILTER_PATTERNS",
        "GITHUB_TOKEN",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper to create a temporary project directory
fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

const PR_VARS: &str = r#"{
    "app_domain": "https://actions.example.com/",
    "repo_owner": "acme",
    "repo_name": "widgets",
    "pr_number": 42,
    "pr_branch": "feature/login",
    "base_branch": "main"
}"#;

const REPO_VARS: &str = r#"{
    "app_domain": "https://actions.example.com",
    "repo_owner": "acme",
    "repo_name": "widgets"
}"#;

fn write_vars(dir: &TempDir, content: &str) {
    fs::write(dir.path().join("vars.json"), content).unwrap();
}

fn write_branches(dir: &TempDir, content: &str) {
    let configs = dir.path().join(".github/configs");
    fs::create_dir_all(&configs).unwrap();
    fs::write(configs.join("backport_branches.json"), content).unwrap();
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        badges()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("comment"))
            .stdout(predicate::str::contains("dispatch"));
    }

    #[test]
    fn test_version() {
        badges().arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_comment_kind() {
        let dir = create_temp_project();
        write_vars(&dir, REPO_VARS);

        badges()
            .current_dir(dir.path())
            .args(["comment", "fancy"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid comment type 'fancy'"));
    }
}

// =============================================================================
// Comment Tests
// =============================================================================

mod comment {
    use super::*;

    #[test]
    fn test_simple_to_stdout() {
        let dir = create_temp_project();
        write_vars(&dir, REPO_VARS);

        badges()
            .current_dir(dir.path())
            .args(["comment", "simple"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("## 🚀 Quick Actions\n\n[![▶ Example]("))
            .stdout(predicate::str::contains(
                "https://actions.example.com/workflow/trigger?owner=acme&repo=widgets&workflow_id=workflow.yml&ref=main)",
            ))
            .stdout(predicate::str::contains("&ui=true)"))
            .stdout(predicate::str::contains("return_url").not());
    }

    #[test]
    fn test_pr_actions_to_file() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);
        write_branches(&dir, r#"["release-1.0", "release-2.0"]"#);

        badges()
            .current_dir(dir.path())
            .args(["comment", "pr_actions", "--output", "out/comment.md"])
            .assert()
            .success();

        let md = fs::read_to_string(dir.path().join("out/comment.md")).unwrap();
        assert!(md.starts_with("## 🚀 Quick Actions\n\n### 🧪 Run Tests\n\n| Test Type | Actions |"));
        assert!(md.contains("| `release-1.0` | [![▶ Backport]("));
        assert!(md.contains("| `release-2.0` | [![▶ Backport]("));
        assert!(md.contains("source_branch=feature%2Flogin"));
        assert!(md.contains("return_url=https%3A%2F%2Fgithub.com%2Facme%2Fwidgets%2Fpull%2F42"));
        // Trailing slash on app_domain is dropped
        assert!(!md.contains("example.com//workflow"));
    }

    #[test]
    fn test_pr_actions_wrapped_branch_file() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);
        write_branches(&dir, r#"{"branches": ["stable"]}"#);

        badges()
            .current_dir(dir.path())
            .args(["comment", "pr_actions"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| `stable` | [![▶ Backport]("));
    }

    #[test]
    fn test_pr_actions_branch_filter_env() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);
        write_branches(&dir, r#"["release-1", "legacy"]"#);

        badges()
            .current_dir(dir.path())
            .env("BRANCH_FILTER_PATTERNS", "release-*")
            .args(["comment", "pr_actions"])
            .assert()
            .success()
            .stdout(predicate::str::contains("`release-1`"))
            .stdout(predicate::str::contains("`legacy`").not());
    }

    #[test]
    fn test_pr_actions_explicit_branches_file() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);
        fs::write(dir.path().join("targets.json"), r#"["hotfix"]"#).unwrap();

        badges()
            .current_dir(dir.path())
            .args(["comment", "pr_actions", "--branches-file", "targets.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("`hotfix`"));
    }

    #[test]
    fn test_pr_actions_without_pr_fails() {
        let dir = create_temp_project();
        write_vars(&dir, REPO_VARS);

        badges()
            .current_dir(dir.path())
            .args(["comment", "pr_actions"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error generating comment"))
            .stderr(predicate::str::contains("required for the pr_actions template"));
    }

    #[test]
    fn test_pr_actions_missing_branches_file_fails() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);

        badges()
            .current_dir(dir.path())
            .args(["comment", "pr_actions"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error generating comment"));
    }

    #[test]
    fn test_table_only_with_rows_file() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);
        fs::write(
            dir.path().join("rows.json"),
            r#"{"workflow": "deploy.yml", "columns": ["Env", "Run"],
                "rows": [["**Staging**", {"pr": "{pr_number}"}], {"label": "Prod", "color": "f44336"}]}"#,
        )
        .unwrap();

        badges()
            .current_dir(dir.path())
            .args(["comment", "table_only", "--rows", "rows.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| Env | Run |\n|--------|--------|\n"))
            .stdout(predicate::str::contains("workflow_id=deploy.yml&ref=main&pr=42"))
            .stdout(predicate::str::contains("%E2%96%B6_Prod-f44336?"));
    }

    #[test]
    fn test_table_only_without_rows_is_heading() {
        let dir = create_temp_project();
        write_vars(&dir, REPO_VARS);

        badges()
            .current_dir(dir.path())
            .args(["comment", "table_only"])
            .assert()
            .success()
            .stdout("## 🚀 Quick Actions\n");
    }

    #[test]
    fn test_missing_vars_file() {
        let dir = create_temp_project();

        badges()
            .current_dir(dir.path())
            .args(["comment", "simple"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error loading vars"));
    }

    #[test]
    fn test_invalid_vars_file() {
        let dir = create_temp_project();
        write_vars(&dir, r#"{"app_domain": "x"}"#);

        badges()
            .current_dir(dir.path())
            .args(["comment", "simple"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error loading vars"));
    }

    #[test]
    fn test_config_style_applies() {
        let dir = create_temp_project();
        write_vars(&dir, REPO_VARS);
        let configs = dir.path().join(".github/configs");
        fs::create_dir_all(&configs).unwrap();
        fs::write(
            configs.join("badges.toml"),
            "[palette]\nui = \"123456\"\n\n[defaults]\nstyle = \"for-the-badge\"\n",
        )
        .unwrap();

        badges()
            .current_dir(dir.path())
            .args(["comment", "simple"])
            .assert()
            .success()
            .stdout(predicate::str::contains("style=for-the-badge"))
            .stdout(predicate::str::contains("-123456?style=for-the-badge"));
    }
}

// =============================================================================
// Preview Tests
// =============================================================================

mod preview {
    use super::*;

    #[test]
    fn test_preview_writes_all_templates() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);
        write_branches(&dir, r#"["release-1.0"]"#);

        badges()
            .current_dir(dir.path())
            .args(["preview", "--out-dir", "previews"])
            .assert()
            .success()
            .stdout(predicate::str::contains("preview_pr_actions.md"));

        let out = dir.path().join("previews");
        for name in ["pr_actions", "simple", "table_only"] {
            let md = fs::read_to_string(out.join(format!("preview_{}.md", name))).unwrap();
            assert!(md.starts_with("## 🚀 Quick Actions"), "{}", name);
        }
    }
}

// =============================================================================
// URL Tests
// =============================================================================

mod url {
    use super::*;

    #[test]
    fn test_url_direct() {
        let dir = create_temp_project();
        write_vars(&dir, PR_VARS);

        badges()
            .current_dir(dir.path())
            .args(["url", "ci.yml", "--param", "pr={pr_number}", "--param", "msg=a b"])
            .assert()
            .success()
            .stdout(
                "https://actions.example.com/workflow/trigger?owner=acme&repo=widgets\
                 &workflow_id=ci.yml&ref=main&pr=42&msg=a+b\
                 &return_url=https%3A%2F%2Fgithub.com%2Facme%2Fwidgets%2Fpull%2F42\n",
            );
    }

    #[test]
    fn test_url_ui_with_ref() {
        let dir = create_temp_project();
        write_vars(&dir, REPO_VARS);

        badges()
            .current_dir(dir.path())
            .args(["url", "ci.yml", "--ref", "develop", "--ui"])
            .assert()
            .success()
            .stdout(predicate::str::contains("&ref=develop&ui=true\n"));
    }

    #[test]
    fn test_url_bad_param() {
        let dir = create_temp_project();
        write_vars(&dir, REPO_VARS);

        badges()
            .current_dir(dir.path())
            .args(["url", "ci.yml", "--param", "novalue"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Expected KEY=VALUE"));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_init_show_validate() {
        let dir = create_temp_project();

        badges()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created badges.toml"));
        assert!(dir.path().join(".github/configs/badges.toml").exists());

        badges()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        badges()
            .current_dir(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("direct = \"4caf50\""))
            .stdout(predicate::str::contains("style = \"flat-square\""));

        badges()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid."));
    }

    #[test]
    fn test_config_validate_warnings() {
        let dir = create_temp_project();
        let path = dir.path().join("badges.toml");
        fs::write(&path, "[palette]\ndirect = \"green\"\n").unwrap();

        badges()
            .current_dir(dir.path())
            .args(["--config", "badges.toml", "config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("palette.direct = 'green'"));
    }

    #[test]
    fn test_config_show_without_file() {
        let dir = create_temp_project();

        badges()
            .current_dir(dir.path())
            .args(["config"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No badges.toml found"));
    }
}

// =============================================================================
// GitHub Commands (offline behavior only)
// =============================================================================

mod github {
    use super::*;

    #[test]
    fn test_dispatch_requires_token() {
        let dir = create_temp_project();

        badges()
            .current_dir(dir.path())
            .args(["dispatch", "--owner", "acme", "--repo", "widgets", "--workflow", "ci.yml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("GITHUB_TOKEN must be set"));
    }
}
