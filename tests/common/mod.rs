//! Shared fixtures: a fully rendered project with every optional file present.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use scaffold_variants::{validate, Configuration, RawConfiguration};
use tempfile::TempDir;

/// Raw configuration with the template defaults used by the test suite
pub fn raw(api: bool, cli: bool, bdd: bool) -> RawConfiguration {
    let flag = |on: bool| if on { "1" } else { "0" }.to_string();
    let mut raw = RawConfiguration::new();
    raw.project_name = "test-project".to_string();
    raw.with_fastapi_api = flag(api);
    raw.with_typer_cli = flag(cli);
    raw.with_pytest_bdd = flag(bdd);
    raw
}

pub fn accepted(raw: &RawConfiguration) -> Configuration {
    validate(raw).expect("fixture configuration must validate").config
}

/// Every path the template can render for package `pkg`, relative to the root
pub fn maximal_files(pkg: &str) -> Vec<String> {
    let mut files: Vec<String> = [
        "__init__.py",
        "py.typed",
        "api.py",
        "models.py",
        "services.py",
        "cli.py",
    ]
    .iter()
    .map(|f| format!("src/{}/{}", pkg, f))
    .collect();

    files.extend(
        [
            "tests/test_import.py",
            "tests/test_api.py",
            "tests/test_cli.py",
            "tests/features/import.feature",
            "tests/features/api.feature",
            "tests/features/cli.feature",
            ".vscode/launch.json",
            ".github/workflows/pr.yml",
            ".github/workflows/test.yml",
            ".github/dependabot.yml",
            "LICENSE",
            "pyproject.toml",
            "README.md",
        ]
        .iter()
        .map(|f| f.to_string()),
    );
    files
}

/// Render the maximal tree into a fresh temp dir; returns (guard, project root)
pub fn render_maximal(pkg: &str) -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path().join("project");
    for rel in maximal_files(pkg) {
        let path = root.join(&rel);
        fs::create_dir_all(path.parent().expect("fixture paths have parents"))
            .expect("create parent");
        fs::write(&path, format!("# {}\n", rel)).expect("write fixture file");
    }
    (tmp, root)
}

pub fn exists(root: &Path, rel: &str) -> bool {
    root.join(rel).exists()
}
