//! Error handling module for scaffold-variants
//!
//! Errors are split by who caused them:
//!
//! - [`ConfigurationError`]: bad user input, fixed by re-running with corrected values
//! - [`IntegrityError`]: a defect in the static rule table, never the user's fault
//! - [`FilesystemError`]: the environment refused a deletion
//!
//! [`ScaffoldError`] wraps all three and maps each to a distinct process exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::generation_state::GenerationTransitionError;

/// Exit code for rejected user input.
pub const EXIT_CONFIGURATION: u8 = 1;
/// Exit code for internal rule-table defects (sysexits `EX_SOFTWARE`).
pub const EXIT_INTEGRITY: u8 = 70;
/// Exit code for I/O failures during pruning (sysexits `EX_IOERR`).
pub const EXIT_FILESYSTEM: u8 = 74;

/// User-caused validation failures raised before any file is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Project name is empty or contains characters outside `[A-Za-z0-9 -]`
    #[error(
        "Invalid project_name '{name}'. Only letters, digits, spaces, and hyphens are allowed."
    )]
    InvalidName { name: String },

    /// Name uses only separators, so no package or directory name can be derived
    #[error(
        "Invalid project_name '{name}'. It must contain at least one letter or digit."
    )]
    NameWithoutWords { name: String },

    /// Version string does not split into two integer components
    #[error("Invalid python_version '{value}'.")]
    UnparseableVersion { value: String },

    /// Version parsed but is below the supported floor
    #[error("python_version must be >= {minimum}, got '{value}'.")]
    VersionTooLow { value: String, minimum: String },

    /// Enum-valued field holds a value outside its choice list
    #[error("Invalid {field} '{value}'. Expected one of: {expected}.")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Feature flag is not a recognizable boolean
    #[error("Invalid {field} '{value}'. Expected 1 or 0.")]
    InvalidFlag { field: &'static str, value: String },
}

/// Defects in the removal rule table.
///
/// These never come from user input. Seeing one means the table shipped with
/// a bad pattern and generation must abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Removal pattern '{pattern}' is absolute; patterns must be relative to the project root")]
    AbsolutePattern { pattern: String },

    #[error("Removal pattern '{pattern}' contains a parent-directory component")]
    ParentTraversal { pattern: String },

    #[error("Removal directive '{directive}' has an empty target pattern")]
    EmptyPattern { directive: &'static str },

    #[error("Removal pattern '{pattern}' resolves to an empty path segment: {resolved}")]
    EmptySegment { pattern: String, resolved: String },

    #[error("Removal pattern '{pattern}' uses unknown placeholder '{placeholder}'")]
    UnknownPlaceholder { pattern: String, placeholder: String },

    #[error("Removal target '{pattern}' is declared by both '{first}' and '{second}'")]
    DuplicateTarget {
        pattern: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Resolved path {} escapes project root {}", path.display(), root.display())]
    EscapesRoot { path: PathBuf, root: PathBuf },
}

/// Environment failures while deleting from the generated tree.
#[derive(Error, Debug)]
pub enum FilesystemError {
    #[error("Project root {} does not exist or is not a directory", path.display())]
    MissingRoot { path: PathBuf },

    #[error("Failed to remove {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Main error type for scaffold-variants
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Errors raised by the external renderer
    #[error("Render error: {0}")]
    Render(String),

    #[error(transparent)]
    Transition(#[from] GenerationTransitionError),
}

/// Result type alias for scaffold-variants operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

impl ScaffoldError {
    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Process exit code for this error class.
    ///
    /// Configuration problems use 1 so template engines treat them like a
    /// failed pre-generation hook. Everything system-side gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => EXIT_CONFIGURATION,
            Self::Integrity(_) | Self::Transition(_) => EXIT_INTEGRITY,
            Self::Filesystem(_) | Self::Render(_) => EXIT_FILESYSTEM,
        }
    }

    /// True if the user can fix this by changing their input.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
