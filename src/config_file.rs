//! Raw configuration as the templating engine supplies it.
//!
//! Every field is a string, exactly as rendered into the hook. Typed coercion
//! happens in [`crate::validator`]; nothing here rejects a value.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Untyped generation inputs, loadable from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfiguration {
    pub project_name: String,
    pub github_org: String,
    pub python_version: String,
    pub development_environment: String,
    pub license: String,
    pub with_conventional_commits: String,
    pub with_fastapi_api: String,
    pub with_typer_cli: String,
    pub with_pytest_bdd: String,
    pub with_sentry: String,
}

impl Default for RawConfiguration {
    fn default() -> Self {
        Self {
            project_name: "my-project".to_string(),
            github_org: "my-org".to_string(),
            python_version: "3.12".to_string(),
            development_environment: "strict".to_string(),
            license: "MIT".to_string(),
            with_conventional_commits: "1".to_string(),
            with_fastapi_api: "1".to_string(),
            with_typer_cli: "1".to_string(),
            with_pytest_bdd: "0".to_string(),
            with_sentry: "0".to_string(),
        }
    }
}

/// Per-field overrides, typically from command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOverrides {
    pub project_name: Option<String>,
    pub github_org: Option<String>,
    pub python_version: Option<String>,
    pub development_environment: Option<String>,
    pub license: Option<String>,
    pub with_conventional_commits: Option<String>,
    pub with_fastapi_api: Option<String>,
    pub with_typer_cli: Option<String>,
    pub with_pytest_bdd: Option<String>,
    pub with_sentry: Option<String>,
}

impl RawConfiguration {
    /// Create a configuration holding the template defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file. Missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Replace every field for which an override is present.
    pub fn apply_overrides(mut self, overrides: RawOverrides) -> Self {
        let RawOverrides {
            project_name,
            github_org,
            python_version,
            development_environment,
            license,
            with_conventional_commits,
            with_fastapi_api,
            with_typer_cli,
            with_pytest_bdd,
            with_sentry,
        } = overrides;

        if let Some(v) = project_name {
            self.project_name = v;
        }
        if let Some(v) = github_org {
            self.github_org = v;
        }
        if let Some(v) = python_version {
            self.python_version = v;
        }
        if let Some(v) = development_environment {
            self.development_environment = v;
        }
        if let Some(v) = license {
            self.license = v;
        }
        if let Some(v) = with_conventional_commits {
            self.with_conventional_commits = v;
        }
        if let Some(v) = with_fastapi_api {
            self.with_fastapi_api = v;
        }
        if let Some(v) = with_typer_cli {
            self.with_typer_cli = v;
        }
        if let Some(v) = with_pytest_bdd {
            self.with_pytest_bdd = v;
        }
        if let Some(v) = with_sentry {
            self.with_sentry = v;
        }
        self
    }
}
