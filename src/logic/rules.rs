//! Removal directive table
//!
//! Each row pairs a [`Condition`] with the paths that must not survive when
//! it holds. Rows are data, not control flow: a new optional feature is one
//! more entry in [`STANDARD_DIRECTIVES`].
//!
//! # Table
//!
//! | Directive | Condition | Removed |
//! |-----------|-----------|---------|
//! | `pr-title-lint` | conventional commits off | `.github/workflows/pr.yml` |
//! | `strict-tooling` | strict mode off | `src/{package}/py.typed`, `.github/dependabot.yml` |
//! | `api-layer` | API off | API, models, services modules; API tests |
//! | `api-scenario` | API off and BDD on | `tests/features/api.feature` |
//! | `cli-layer` | CLI off | CLI module; CLI tests |
//! | `cli-scenario` | CLI off and BDD on | `tests/features/cli.feature` |
//! | `launch-config` | API off and CLI off | `.vscode/` |
//! | `bdd-scenarios` | BDD off | `tests/features/` |
//! | `license-text` | license is Proprietary | `LICENSE` |

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::config::Configuration;
use crate::error::IntegrityError;
use crate::types::{Feature, License};

/// Placeholder replaced by the package (snake-case) identifier
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Boolean predicate over a [`Configuration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Enabled(Feature),
    Disabled(Feature),
    /// Holds only when every inner condition holds
    All(&'static [Condition]),
    /// Holds when at least one inner condition holds
    Any(&'static [Condition]),
    LicenseIs(License),
}

impl Condition {
    pub fn holds(&self, config: &Configuration) -> bool {
        match self {
            Self::Enabled(feature) => config.is_enabled(*feature),
            Self::Disabled(feature) => !config.is_enabled(*feature),
            Self::All(conditions) => conditions.iter().all(|c| c.holds(config)),
            Self::Any(conditions) => conditions.iter().any(|c| c.holds(config)),
            Self::LicenseIs(license) => config.license() == *license,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled(feature) => write!(f, "{} enabled", feature),
            Self::Disabled(feature) => write!(f, "{} disabled", feature),
            Self::All(parts) => write_joined(f, parts, "and"),
            Self::Any(parts) => write_joined(f, parts, "or"),
            Self::LicenseIs(license) => write!(f, "license is {}", license),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[Condition], sep: &str) -> fmt::Result {
    for (i, condition) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", condition)?;
    }
    Ok(())
}

/// What a directive deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    File(&'static str),
    /// Removed recursively
    Dir(&'static str),
}

impl Target {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::File(p) | Self::Dir(p) => p,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir(_))
    }

    /// Substitute placeholders, yielding a path relative to the project root.
    ///
    /// # Errors
    ///
    /// `EmptySegment` if substitution leaves an empty component (`src//api.py`),
    /// which `Path` would otherwise collapse into a different target.
    pub fn resolve(&self, config: &Configuration) -> Result<PathBuf, IntegrityError> {
        let resolved = self
            .pattern()
            .replace(PACKAGE_PLACEHOLDER, config.snake_name());

        if resolved.split('/').any(str::is_empty) {
            return Err(IntegrityError::EmptySegment {
                pattern: self.pattern().to_string(),
                resolved,
            });
        }
        Ok(PathBuf::from(resolved))
    }
}

/// A named (condition, targets) row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalDirective {
    pub name: &'static str,
    pub condition: Condition,
    pub targets: &'static [Target],
}

impl RemovalDirective {
    pub fn applies_to(&self, config: &Configuration) -> bool {
        self.condition.holds(config)
    }
}

pub const STANDARD_DIRECTIVES: &[RemovalDirective] = &[
    RemovalDirective {
        name: "pr-title-lint",
        condition: Condition::Disabled(Feature::ConventionalCommits),
        targets: &[Target::File(".github/workflows/pr.yml")],
    },
    RemovalDirective {
        name: "strict-tooling",
        condition: Condition::Disabled(Feature::StrictMode),
        targets: &[
            Target::File("src/{package}/py.typed"),
            Target::File(".github/dependabot.yml"),
        ],
    },
    RemovalDirective {
        name: "api-layer",
        condition: Condition::Disabled(Feature::Api),
        targets: &[
            Target::File("src/{package}/api.py"),
            Target::File("src/{package}/models.py"),
            Target::File("src/{package}/services.py"),
            Target::File("tests/test_api.py"),
        ],
    },
    RemovalDirective {
        name: "api-scenario",
        condition: Condition::All(&[
            Condition::Disabled(Feature::Api),
            Condition::Enabled(Feature::Bdd),
        ]),
        targets: &[Target::File("tests/features/api.feature")],
    },
    RemovalDirective {
        name: "cli-layer",
        condition: Condition::Disabled(Feature::Cli),
        targets: &[
            Target::File("src/{package}/cli.py"),
            Target::File("tests/test_cli.py"),
        ],
    },
    RemovalDirective {
        name: "cli-scenario",
        condition: Condition::All(&[
            Condition::Disabled(Feature::Cli),
            Condition::Enabled(Feature::Bdd),
        ]),
        targets: &[Target::File("tests/features/cli.feature")],
    },
    // Single conjunctive rule: must not fire when only one layer is off.
    RemovalDirective {
        name: "launch-config",
        condition: Condition::All(&[
            Condition::Disabled(Feature::Api),
            Condition::Disabled(Feature::Cli),
        ]),
        targets: &[Target::Dir(".vscode")],
    },
    RemovalDirective {
        name: "bdd-scenarios",
        condition: Condition::Disabled(Feature::Bdd),
        targets: &[Target::Dir("tests/features")],
    },
    RemovalDirective {
        name: "license-text",
        condition: Condition::LicenseIs(License::Proprietary),
        targets: &[Target::File("LICENSE")],
    },
];

/// An ordered set of removal directives
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    directives: &'static [RemovalDirective],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTable {
    /// The table shipped with this template version
    pub const fn standard() -> Self {
        Self::new(STANDARD_DIRECTIVES)
    }

    pub const fn new(directives: &'static [RemovalDirective]) -> Self {
        Self { directives }
    }

    pub fn directives(&self) -> &'static [RemovalDirective] {
        self.directives
    }

    /// Directives whose condition holds for `config`, in table order
    pub fn matching(
        self,
        config: &Configuration,
    ) -> impl Iterator<Item = &'static RemovalDirective> + '_ {
        self.directives.iter().filter(move |d| d.applies_to(config))
    }

    /// Check every pattern before anything is deleted.
    ///
    /// # Errors
    ///
    /// - Empty pattern, or one naming only the root (`.`)
    /// - Absolute or drive-prefixed pattern
    /// - `..` anywhere in the pattern
    /// - A `{...}` placeholder other than `{package}`
    /// - The same pattern declared by two directives
    pub fn verify(&self) -> Result<(), IntegrityError> {
        let mut seen: HashMap<&'static str, &'static str> = HashMap::new();

        for directive in self.directives {
            for target in directive.targets {
                let pattern = target.pattern();
                verify_pattern(directive.name, pattern)?;

                if let Some(first) = seen.insert(pattern, directive.name) {
                    return Err(IntegrityError::DuplicateTarget {
                        pattern: pattern.to_string(),
                        first,
                        second: directive.name,
                    });
                }
            }
        }
        Ok(())
    }
}

fn verify_pattern(directive: &'static str, pattern: &str) -> Result<(), IntegrityError> {
    if pattern.trim().is_empty() {
        return Err(IntegrityError::EmptyPattern { directive });
    }

    let unknown = pattern
        .replace(PACKAGE_PLACEHOLDER, "")
        .split('{')
        .nth(1)
        .map(|rest| rest.split('}').next().unwrap_or(rest).to_string());
    if let Some(placeholder) = unknown {
        return Err(IntegrityError::UnknownPlaceholder {
            pattern: pattern.to_string(),
            placeholder: format!("{{{}}}", placeholder),
        });
    }

    let mut named = false;
    for component in Path::new(pattern).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {
                return Err(IntegrityError::AbsolutePattern {
                    pattern: pattern.to_string(),
                });
            }
            Component::ParentDir => {
                return Err(IntegrityError::ParentTraversal {
                    pattern: pattern.to_string(),
                });
            }
            Component::CurDir => {}
            Component::Normal(_) => named = true,
        }
    }
    // "." or "./" would name the project root itself
    if !named {
        return Err(IntegrityError::EmptyPattern { directive });
    }
    Ok(())
}
