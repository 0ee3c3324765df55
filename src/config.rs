//! Validated generation configuration.
//!
//! A [`Configuration`] can only be produced by [`crate::validator::validate`];
//! once built it is never mutated. The snake/kebab identifiers used for path
//! interpolation are computed exactly once, at construction.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::types::{DevelopmentEnvironment, Feature, License};

/// A `(major, minor)` interpreter version.
///
/// Ordering is lexicographic on `(major, minor)`, so `3.9 < 3.10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl PythonVersion {
    /// Lowest version the generated project supports unless overridden
    pub const MINIMUM: Self = Self::new(3, 10);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse the first two dot-separated components.
    ///
    /// Anything after the minor component (a patch level, say) is ignored.
    /// Returns `None` when fewer than two components exist or either is not
    /// an unsigned integer.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let minor = parts.next()?.trim().parse().ok()?;
        Some(Self::new(major, minor))
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("'{}' is not a MAJOR.MINOR version", s))
    }
}

/// Snake- and kebab-case forms of the project name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectIdentifiers {
    /// Package directory name, e.g. `my_cool_app`
    pub snake: String,
    /// Project root directory name, e.g. `my-cool-app`
    pub kebab: String,
}

impl ProjectIdentifiers {
    /// Derive both identifiers from a display name.
    ///
    /// Words are split on spaces and hyphens, empty pieces dropped, and each
    /// word lowercased.
    pub fn derive(project_name: &str) -> Self {
        let words: Vec<String> = project_name
            .split(|c: char| c == ' ' || c == '-')
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect();

        Self {
            snake: words.join("_"),
            kebab: words.join("-"),
        }
    }
}

/// Immutable, validated inputs for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    project_name: String,
    github_org: String,
    python_version: PythonVersion,
    development_environment: DevelopmentEnvironment,
    license: License,
    with_conventional_commits: bool,
    with_fastapi_api: bool,
    with_typer_cli: bool,
    with_pytest_bdd: bool,
    with_sentry: bool,
    identifiers: ProjectIdentifiers,
}

/// Typed field values handed over by the validator
#[derive(Debug, Clone)]
pub(crate) struct ConfigurationParts {
    pub project_name: String,
    pub github_org: String,
    pub python_version: PythonVersion,
    pub development_environment: DevelopmentEnvironment,
    pub license: License,
    pub with_conventional_commits: bool,
    pub with_fastapi_api: bool,
    pub with_typer_cli: bool,
    pub with_pytest_bdd: bool,
    pub with_sentry: bool,
}

impl Configuration {
    pub(crate) fn from_parts(parts: ConfigurationParts) -> Self {
        let identifiers = ProjectIdentifiers::derive(&parts.project_name);
        Self {
            project_name: parts.project_name,
            github_org: parts.github_org,
            python_version: parts.python_version,
            development_environment: parts.development_environment,
            license: parts.license,
            with_conventional_commits: parts.with_conventional_commits,
            with_fastapi_api: parts.with_fastapi_api,
            with_typer_cli: parts.with_typer_cli,
            with_pytest_bdd: parts.with_pytest_bdd,
            with_sentry: parts.with_sentry,
            identifiers,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// GitHub owner used in repository URLs; passed through unvalidated
    pub fn github_org(&self) -> &str {
        &self.github_org
    }

    pub fn python_version(&self) -> PythonVersion {
        self.python_version
    }

    pub fn development_environment(&self) -> DevelopmentEnvironment {
        self.development_environment
    }

    pub fn license(&self) -> License {
        self.license
    }

    pub fn with_conventional_commits(&self) -> bool {
        self.with_conventional_commits
    }

    pub fn with_fastapi_api(&self) -> bool {
        self.with_fastapi_api
    }

    pub fn with_typer_cli(&self) -> bool {
        self.with_typer_cli
    }

    pub fn with_pytest_bdd(&self) -> bool {
        self.with_pytest_bdd
    }

    pub fn with_sentry(&self) -> bool {
        self.with_sentry
    }

    /// Package directory name (`src/<snake>/`)
    pub fn snake_name(&self) -> &str {
        &self.identifiers.snake
    }

    /// Project root directory name
    pub fn kebab_name(&self) -> &str {
        &self.identifiers.kebab
    }

    pub fn identifiers(&self) -> &ProjectIdentifiers {
        &self.identifiers
    }

    /// Whether an optional feature is switched on in this run
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::ConventionalCommits => self.with_conventional_commits,
            Feature::StrictMode => self.development_environment.is_strict(),
            Feature::Api => self.with_fastapi_api,
            Feature::Cli => self.with_typer_cli,
            Feature::Bdd => self.with_pytest_bdd,
            Feature::Sentry => self.with_sentry,
        }
    }
}
