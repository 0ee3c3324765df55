//! Type-safe configuration types for scaffold-variants
//!
//! The templating engine hands every value over as a string. These enums are
//! what those strings become once the validator has coerced them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Tooling strictness of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum DevelopmentEnvironment {
    #[default]
    #[strum(serialize = "strict")]
    Strict,
    #[strum(serialize = "simple")]
    Simple,
}

impl DevelopmentEnvironment {
    /// Strict mode keeps the type marker and dependency-update automation
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// License choice for the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum License {
    #[default]
    #[serde(rename = "MIT")]
    #[strum(serialize = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    #[strum(serialize = "Apache-2.0")]
    Apache2,
    #[serde(rename = "BSD-3-Clause")]
    #[strum(serialize = "BSD-3-Clause")]
    Bsd3Clause,
    #[serde(rename = "GPL-3.0")]
    #[strum(serialize = "GPL-3.0")]
    Gpl3,
    /// No license text is shipped
    #[serde(rename = "Proprietary")]
    #[strum(serialize = "Proprietary")]
    Proprietary,
}

impl License {
    /// Whether a `LICENSE` file belongs in the generated tree
    pub fn ships_license_file(&self) -> bool {
        !matches!(self, Self::Proprietary)
    }
}

/// Generic on/off toggle for feature flags.
///
/// Templating engines pass flags as `"1"`/`"0"`; the spelled-out forms are
/// accepted too so hand-written config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Toggle {
    #[strum(to_string = "1", serialize = "true", serialize = "yes", serialize = "y", serialize = "on")]
    Yes,
    #[default]
    #[strum(to_string = "0", serialize = "false", serialize = "no", serialize = "n", serialize = "off")]
    No,
}

impl Toggle {
    /// Convert to boolean
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Yes)
    }

    /// Parse a raw flag value, ignoring surrounding whitespace.
    pub fn parse_flag(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Optional feature a removal directive can depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter)]
pub enum Feature {
    #[strum(serialize = "conventional commits")]
    ConventionalCommits,
    /// Derived from `development_environment == strict`
    #[strum(serialize = "strict mode")]
    StrictMode,
    #[strum(serialize = "API layer")]
    Api,
    #[strum(serialize = "CLI layer")]
    Cli,
    #[strum(serialize = "BDD scaffolding")]
    Bdd,
    #[strum(serialize = "error telemetry")]
    Sentry,
}
