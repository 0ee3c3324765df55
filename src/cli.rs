use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PythonVersion;
use crate::config_file::{RawConfiguration, RawOverrides};
use crate::validator::ValidatorOptions;

/// scaffold-variants - validate template inputs and prune generated projects
#[derive(Parser)]
#[command(name = "scaffold-variants")]
#[command(about = "Validate project template inputs and prune disabled variants")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pre-generation check: reject invalid input before anything is rendered
    Validate {
        #[command(flatten)]
        input: ConfigArgs,
    },
    /// Post-generation pass: delete files belonging to disabled features
    Prune {
        /// Root of the already-rendered project
        project_dir: PathBuf,

        #[command(flatten)]
        input: ConfigArgs,

        /// Report what would be removed without deleting anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the removal plan for a configuration without touching disk
    Plan {
        #[command(flatten)]
        input: ConfigArgs,
    },
    /// Print the template variables as JSON
    Context {
        #[command(flatten)]
        input: ConfigArgs,
    },
}

/// Configuration inputs shared by every subcommand.
///
/// Values come from `--config` (JSON) when given, otherwise the template
/// defaults; any per-field flag then overrides the loaded value.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// JSON file with configuration values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project display name (letters, digits, spaces, hyphens)
    #[arg(long)]
    pub project_name: Option<String>,

    /// GitHub user or organization owning the repository
    #[arg(long)]
    pub github_org: Option<String>,

    /// Target Python version, MAJOR.MINOR
    #[arg(long)]
    pub python_version: Option<String>,

    /// strict or simple
    #[arg(long)]
    pub development_environment: Option<String>,

    /// MIT, Apache-2.0, BSD-3-Clause, GPL-3.0 or Proprietary
    #[arg(long)]
    pub license: Option<String>,

    #[arg(long, value_name = "0|1")]
    pub with_conventional_commits: Option<String>,

    #[arg(long, value_name = "0|1")]
    pub with_fastapi_api: Option<String>,

    #[arg(long, value_name = "0|1")]
    pub with_typer_cli: Option<String>,

    #[arg(long, value_name = "0|1")]
    pub with_pytest_bdd: Option<String>,

    #[arg(long, value_name = "0|1")]
    pub with_sentry: Option<String>,

    /// Lowest accepted Python version
    #[arg(long, value_name = "MAJOR.MINOR", default_value = "3.10")]
    pub min_python: PythonVersion,
}

impl ConfigArgs {
    /// Resolve the raw configuration: file (or defaults), then flag overrides.
    pub fn load(&self) -> anyhow::Result<RawConfiguration> {
        let base = match &self.config {
            Some(path) => RawConfiguration::load_from_file(path)?,
            None => RawConfiguration::default(),
        };
        Ok(base.apply_overrides(self.overrides()))
    }

    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            minimum_python: self.min_python,
        }
    }

    fn overrides(&self) -> RawOverrides {
        RawOverrides {
            project_name: self.project_name.clone(),
            github_org: self.github_org.clone(),
            python_version: self.python_version.clone(),
            development_environment: self.development_environment.clone(),
            license: self.license.clone(),
            with_conventional_commits: self.with_conventional_commits.clone(),
            with_fastapi_api: self.with_fastapi_api.clone(),
            with_typer_cli: self.with_typer_cli.clone(),
            with_pytest_bdd: self.with_pytest_bdd.clone(),
            with_sentry: self.with_sentry.clone(),
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
