//! Variables handed to the external templating engine.
//!
//! The engine substitutes these into file contents and path names. Two are
//! derived rather than supplied: the snake-case package name and the
//! kebab-case project directory name.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Configuration;

/// Substitution variables for one generation run.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
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
    #[serde(rename = "__project_name_snake_case")]
    pub project_name_snake_case: String,
    #[serde(rename = "__project_name_kebab_case")]
    pub project_name_kebab_case: String,
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

impl TemplateContext {
    /// Build the context from a validated configuration.
    ///
    /// Flags are normalized to `"1"`/`"0"` whatever spelling the user supplied.
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            project_name: config.project_name().to_string(),
            github_org: config.github_org().to_string(),
            python_version: config.python_version().to_string(),
            development_environment: config.development_environment().to_string(),
            license: config.license().to_string(),
            with_conventional_commits: flag(config.with_conventional_commits()),
            with_fastapi_api: flag(config.with_fastapi_api()),
            with_typer_cli: flag(config.with_typer_cli()),
            with_pytest_bdd: flag(config.with_pytest_bdd()),
            with_sentry: flag(config.with_sentry()),
            project_name_snake_case: config.snake_name().to_string(),
            project_name_kebab_case: config.kebab_name().to_string(),
        }
    }

    /// Directory the engine must render the project into
    pub fn project_dir_name(&self) -> &str {
        &self.project_name_kebab_case
    }

    /// Directory name of the importable package under `src/`
    pub fn package_dir_name(&self) -> &str {
        &self.project_name_snake_case
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize template context")
    }
}
