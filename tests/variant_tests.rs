//! End-to-end tests for variant resolution
//!
//! Each test renders the maximal tree, prunes it for one configuration and
//! checks which paths survive.

mod common;

use common::{accepted, exists, raw, render_maximal};
use scaffold_variants::{
    plan_removals, prune_tree, ConfigurationError, FilesystemError, PruneOptions, RuleTable,
    ScaffoldError,
};

const PKG: &str = "test_project";

fn prune(api: bool, cli: bool, bdd: bool) -> (tempfile::TempDir, std::path::PathBuf) {
    let (tmp, root) = render_maximal(PKG);
    let config = accepted(&raw(api, cli, bdd));
    prune_tree(&root, &config, PruneOptions::default()).expect("prune should succeed");
    (tmp, root)
}

// =============================================================================
// Named scenarios
// =============================================================================

#[test]
fn test_project_name_drives_identifiers() {
    let mut input = raw(true, true, false);
    input.project_name = "My Cool App".to_string();
    let config = accepted(&input);

    assert_eq!(config.kebab_name(), "my-cool-app");
    assert_eq!(config.snake_name(), "my_cool_app");
}

#[test]
fn test_no_entry_points_keeps_import_smoke_test() {
    let (_tmp, root) = prune(false, false, false);

    assert!(!exists(&root, "tests/features"));
    assert!(!exists(&root, "tests/test_api.py"));
    assert!(!exists(&root, "tests/test_cli.py"));
    assert!(!exists(&root, ".vscode"));
    assert!(exists(&root, "tests/test_import.py"));
    assert!(exists(&root, &format!("src/{}/__init__.py", PKG)));
}

#[test]
fn test_cli_only_with_bdd_keeps_cli_feature() {
    let (_tmp, root) = prune(false, true, true);

    assert!(exists(&root, "tests/features/cli.feature"));
    assert!(exists(&root, "tests/features/import.feature"));
    assert!(!exists(&root, "tests/features/api.feature"));
    assert!(exists(&root, ".vscode/launch.json"));
}

#[test]
fn test_python_below_floor_is_rejected_before_pruning() {
    let mut input = raw(true, true, false);
    input.python_version = "3.9".to_string();

    let err = scaffold_variants::validate(&input).unwrap_err();
    assert!(matches!(err, ConfigurationError::VersionTooLow { .. }));
}

// =============================================================================
// Exhaustive flag combinations
// =============================================================================

#[test]
fn test_every_flag_combination() {
    for mask in 0..8u8 {
        let (api, cli, bdd) = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
        let (_tmp, root) = prune(api, cli, bdd);
        let ctx = format!("api={} cli={} bdd={}", api, cli, bdd);

        assert_eq!(exists(&root, &format!("src/{}/api.py", PKG)), api, "{}", ctx);
        assert_eq!(exists(&root, &format!("src/{}/models.py", PKG)), api, "{}", ctx);
        assert_eq!(exists(&root, &format!("src/{}/services.py", PKG)), api, "{}", ctx);
        assert_eq!(exists(&root, "tests/test_api.py"), api, "{}", ctx);
        assert_eq!(exists(&root, &format!("src/{}/cli.py", PKG)), cli, "{}", ctx);
        assert_eq!(exists(&root, "tests/test_cli.py"), cli, "{}", ctx);
        assert_eq!(exists(&root, ".vscode"), api || cli, "{}", ctx);

        assert_eq!(exists(&root, "tests/features"), bdd, "{}", ctx);
        assert_eq!(exists(&root, "tests/features/api.feature"), bdd && api, "{}", ctx);
        assert_eq!(exists(&root, "tests/features/cli.feature"), bdd && cli, "{}", ctx);

        // Never touched by the flags
        assert!(exists(&root, "tests/test_import.py"), "{}", ctx);
        assert!(exists(&root, "pyproject.toml"), "{}", ctx);
        assert!(exists(&root, ".github/workflows/test.yml"), "{}", ctx);
    }
}

#[test]
fn test_simple_environment_drops_strict_tooling() {
    let (_tmp, root) = render_maximal(PKG);
    let mut input = raw(true, true, false);
    input.development_environment = "simple".to_string();
    prune_tree(&root, &accepted(&input), PruneOptions::default()).unwrap();

    assert!(!exists(&root, &format!("src/{}/py.typed", PKG)));
    assert!(!exists(&root, ".github/dependabot.yml"));
}

#[test]
fn test_strict_environment_keeps_strict_tooling() {
    let (_tmp, root) = prune(true, true, false);

    assert!(exists(&root, &format!("src/{}/py.typed", PKG)));
    assert!(exists(&root, ".github/dependabot.yml"));
}

#[test]
fn test_conventional_commits_off_drops_pr_lint() {
    let (_tmp, root) = render_maximal(PKG);
    let mut input = raw(true, true, false);
    input.with_conventional_commits = "0".to_string();
    prune_tree(&root, &accepted(&input), PruneOptions::default()).unwrap();

    assert!(!exists(&root, ".github/workflows/pr.yml"));
    assert!(exists(&root, ".github/workflows/test.yml"));
}

#[test]
fn test_license_file_follows_license_choice() {
    for (license, kept) in [
        ("MIT", true),
        ("Apache-2.0", true),
        ("BSD-3-Clause", true),
        ("GPL-3.0", true),
        ("Proprietary", false),
    ] {
        let (_tmp, root) = render_maximal(PKG);
        let mut input = raw(true, true, false);
        input.license = license.to_string();
        prune_tree(&root, &accepted(&input), PruneOptions::default()).unwrap();

        assert_eq!(exists(&root, "LICENSE"), kept, "license {}", license);
    }
}

// =============================================================================
// Idempotence, dry runs and failures
// =============================================================================

#[test]
fn test_second_pass_is_a_noop() {
    let (_tmp, root) = render_maximal(PKG);
    let config = accepted(&raw(false, false, false));

    let first = prune_tree(&root, &config, PruneOptions::default()).unwrap();
    let second = prune_tree(&root, &config, PruneOptions::default()).unwrap();

    assert!(!first.is_noop());
    assert!(second.is_noop());
    assert_eq!(second.already_absent.len(), first.removed.len());
}

#[test]
fn test_dry_run_reports_plan_without_deleting() {
    let (_tmp, root) = render_maximal(PKG);
    let config = accepted(&raw(false, false, false));

    let report = prune_tree(&root, &config, PruneOptions { dry_run: true }).unwrap();
    let plan = plan_removals(RuleTable::standard(), &config).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.removed.len(), plan.len());
    assert!(exists(&root, ".vscode/launch.json"));
    assert!(exists(&root, "tests/features/api.feature"));
}

#[test]
fn test_missing_root_is_a_filesystem_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = accepted(&raw(true, true, false));

    let err = prune_tree(&tmp.path().join("absent"), &config, PruneOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Filesystem(FilesystemError::MissingRoot { .. })
    ));
    assert_eq!(err.exit_code(), 74);
}

#[test]
fn test_default_configuration_removes_only_bdd_tree() {
    let config = accepted(&raw(true, true, false));
    let plan = plan_removals(RuleTable::standard(), &config).unwrap();

    let paths: Vec<_> = plan.paths().map(|p| p.to_path_buf()).collect();
    assert_eq!(paths, vec![std::path::PathBuf::from("tests/features")]);
}
