//! Input Validator
//!
//! Runs before the template is rendered. Turns a [`RawConfiguration`] into a
//! [`Configuration`] or rejects it with the first problem found. Inert but
//! legal flag combinations produce [`Advisory`] values instead of errors.
//!
//! # Check Order
//!
//! | Step | Check | Failure |
//! |------|-------|---------|
//! | 1 | `project_name` matches `[A-Za-z0-9 -]+` and has a letter or digit | `InvalidName`, `NameWithoutWords` |
//! | 2 | `python_version` is `MAJOR.MINOR` and >= floor | `UnparseableVersion`, `VersionTooLow` |
//! | 3 | enum and flag fields coerce | `InvalidChoice`, `InvalidFlag` |
//! | 4 | flag combinations | advisories only |
//!
//! This module never touches the filesystem.

use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::config::{Configuration, ConfigurationParts, ProjectIdentifiers, PythonVersion};
use crate::config_file::RawConfiguration;
use crate::error::ConfigurationError;
use crate::types::{DevelopmentEnvironment, License, Toggle};

/// Non-fatal diagnostic for a logically inert configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advisory {
    /// Telemetry integration requested without the API layer that hosts it
    SentryWithoutApi,
    /// BDD scaffolding with neither entry point; only the import scenario remains
    BddWithoutEntryPoints,
}

impl Advisory {
    /// Stable identifier for scripting against warnings
    pub const fn code(self) -> &'static str {
        match self {
            Self::SentryWithoutApi => "sentry-without-api",
            Self::BddWithoutEntryPoints => "bdd-without-entry-points",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::SentryWithoutApi => {
                "with_sentry=1 has no effect without with_fastapi_api=1. \
                 Sentry integration requires FastAPI."
            }
            Self::BddWithoutEntryPoints => {
                "with_pytest_bdd=1 without with_fastapi_api=1 or with_typer_cli=1 \
                 generates only the import scenario."
            }
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Successful validation: the typed configuration plus any advisories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub config: Configuration,
    pub advisories: Vec<Advisory>,
}

/// Validation settings that vary per template version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    pub minimum_python: PythonVersion,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            minimum_python: PythonVersion::MINIMUM,
        }
    }
}

/// Validate with the default version floor.
pub fn validate(raw: &RawConfiguration) -> Result<Accepted, ConfigurationError> {
    validate_with(raw, ValidatorOptions::default())
}

/// Validate raw inputs, stopping at the first failure.
pub fn validate_with(
    raw: &RawConfiguration,
    options: ValidatorOptions,
) -> Result<Accepted, ConfigurationError> {
    let project_name = check_project_name(&raw.project_name)?;
    let python_version = check_python_version(&raw.python_version, options.minimum_python)?;

    let development_environment: DevelopmentEnvironment =
        parse_choice("development_environment", &raw.development_environment)?;
    let license: License = parse_choice("license", &raw.license)?;

    let parts = ConfigurationParts {
        project_name,
        github_org: raw.github_org.trim().to_string(),
        python_version,
        development_environment,
        license,
        with_conventional_commits: parse_flag(
            "with_conventional_commits",
            &raw.with_conventional_commits,
        )?,
        with_fastapi_api: parse_flag("with_fastapi_api", &raw.with_fastapi_api)?,
        with_typer_cli: parse_flag("with_typer_cli", &raw.with_typer_cli)?,
        with_pytest_bdd: parse_flag("with_pytest_bdd", &raw.with_pytest_bdd)?,
        with_sentry: parse_flag("with_sentry", &raw.with_sentry)?,
    };
    let config = Configuration::from_parts(parts);

    let advisories = collect_advisories(&config);
    debug!(
        project = config.kebab_name(),
        package = config.snake_name(),
        advisories = advisories.len(),
        "Configuration accepted"
    );

    Ok(Accepted { config, advisories })
}

/// Advisories for combinations that are legal but do nothing useful.
pub fn collect_advisories(config: &Configuration) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if config.with_sentry() && !config.with_fastapi_api() {
        advisories.push(Advisory::SentryWithoutApi);
    }

    if config.with_pytest_bdd() && !config.with_fastapi_api() && !config.with_typer_cli() {
        advisories.push(Advisory::BddWithoutEntryPoints);
    }

    advisories
}

fn check_project_name(name: &str) -> Result<String, ConfigurationError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-');

    if !valid {
        return Err(ConfigurationError::InvalidName {
            name: name.to_string(),
        });
    }
    if ProjectIdentifiers::derive(name).snake.is_empty() {
        return Err(ConfigurationError::NameWithoutWords {
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

fn check_python_version(
    raw: &str,
    minimum: PythonVersion,
) -> Result<PythonVersion, ConfigurationError> {
    let too_low = || ConfigurationError::VersionTooLow {
        value: raw.to_string(),
        minimum: minimum.to_string(),
    };

    let Some(version) = PythonVersion::parse(raw) else {
        // Negative components are numbers, just never high enough
        return match signed_components(raw) {
            Some(pair) if pair < (i64::from(minimum.major), i64::from(minimum.minor)) => {
                Err(too_low())
            }
            _ => Err(ConfigurationError::UnparseableVersion {
                value: raw.to_string(),
            }),
        };
    };

    if version < minimum {
        return Err(too_low());
    }
    Ok(version)
}

fn signed_components(raw: &str) -> Option<(i64, i64)> {
    let mut parts = raw.trim().split('.');
    let major = parts.next()?.trim().parse().ok()?;
    let minor = parts.next()?.trim().parse().ok()?;
    Some((major, minor))
}

fn parse_choice<T>(field: &'static str, raw: &str) -> Result<T, ConfigurationError>
where
    T: FromStr + IntoEnumIterator + fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|_| ConfigurationError::InvalidChoice {
            field,
            value: raw.to_string(),
            expected: T::iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ConfigurationError> {
    Toggle::parse_flag(raw)
        .map(|t| t.as_bool())
        .ok_or_else(|| ConfigurationError::InvalidFlag {
            field,
            value: raw.to_string(),
        })
}
