//! Tree pruning engine
//!
//! Holds the ordered list of deletions derived from the rule table
//! ([`PrunePlan`]) and applies it to a rendered project tree.
//!
//! # Design
//!
//! - **Plan first**: building a plan does no I/O; [`apply_plan`] is the only
//!   function here that touches the disk
//! - **Idempotent**: a target that is already gone is recorded and skipped
//! - **Contained**: every path is checked against the project root before
//!   deletion, including through symlinked parents
//! - **No retry**: the first I/O failure aborts the pass, leaving whatever was
//!   already removed

use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::error::{FilesystemError, IntegrityError, Result};

/// A single deletion in the plan. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOp {
    RemoveFile {
        path: PathBuf,
        directive: &'static str,
    },
    /// Recursive removal
    RemoveDir {
        path: PathBuf,
        directive: &'static str,
    },
}

impl PruneOp {
    pub fn path(&self) -> &Path {
        match self {
            Self::RemoveFile { path, .. } | Self::RemoveDir { path, .. } => path,
        }
    }

    pub fn directive(&self) -> &'static str {
        match self {
            Self::RemoveFile { directive, .. } | Self::RemoveDir { directive, .. } => directive,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::RemoveDir { .. })
    }
}

impl fmt::Display for PruneOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveFile { path, directive } => {
                write!(f, "RemoveFile({}) [{}]", path.display(), directive)
            }
            Self::RemoveDir { path, directive } => {
                write!(f, "RemoveDir({}/) [{}]", path.display(), directive)
            }
        }
    }
}

/// Ordered deletions for one configuration.
///
/// File removals come before directory removals so a directory rule never
/// turns an earlier file rule into wasted work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
    pub ops: Vec<PruneOp>,
}

impl PrunePlan {
    /// Build a plan, moving directory removals after all file removals.
    ///
    /// Relative order within each group is preserved.
    pub fn new(ops: Vec<PruneOp>) -> Self {
        let (mut files, dirs): (Vec<_>, Vec<_>) = ops.into_iter().partition(|op| !op.is_dir());
        files.extend(dirs);
        Self { ops: files }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Relative paths in application order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.ops.iter().map(PruneOp::path)
    }

    /// Returns a summary of the plan for logging/display.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Prune Plan: {} operation(s)", self.ops.len())];
        for (i, op) in self.ops.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, op));
        }
        lines.join("\n")
    }
}

/// Knobs for a pruning pass, passed explicitly down the call chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOptions {
    /// Report what would be removed without deleting anything
    pub dry_run: bool,
}

/// What a pruning pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Paths deleted (or that would be deleted, on a dry run)
    pub removed: Vec<PathBuf>,
    /// Targets that did not exist; removing them was a no-op
    pub already_absent: Vec<PathBuf>,
    pub dry_run: bool,
}

impl PruneReport {
    /// True when the pass changed (or would change) nothing
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Apply `plan` beneath `root`.
///
/// # Errors
///
/// - [`FilesystemError::MissingRoot`] if `root` is not a directory
/// - [`IntegrityError::EscapesRoot`] if a planned path is not strictly inside
///   `root`, lexically or through a symlinked parent
/// - [`FilesystemError::Remove`] on the first deletion failure; earlier
///   deletions are not rolled back
pub fn apply_plan(root: &Path, plan: &PrunePlan, options: PruneOptions) -> Result<PruneReport> {
    if !root.is_dir() {
        return Err(FilesystemError::MissingRoot {
            path: root.to_path_buf(),
        }
        .into());
    }
    let canonical_root = fs::canonicalize(root).map_err(|source| FilesystemError::Remove {
        path: root.to_path_buf(),
        source,
    })?;

    let mut report = PruneReport {
        dry_run: options.dry_run,
        ..Default::default()
    };

    for op in &plan.ops {
        let relative = op.path();
        let absolute = contained_path(root, relative)?;

        let metadata = match fs::symlink_metadata(&absolute) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %relative.display(), directive = op.directive(), "Already absent");
                report.already_absent.push(relative.to_path_buf());
                continue;
            }
            Err(source) => {
                return Err(FilesystemError::Remove {
                    path: absolute,
                    source,
                }
                .into());
            }
        };

        ensure_parent_inside(&canonical_root, &absolute)?;

        if options.dry_run {
            info!(path = %relative.display(), directive = op.directive(), "Would remove");
        } else {
            let removal = if op.is_dir() && metadata.is_dir() {
                fs::remove_dir_all(&absolute)
            } else {
                fs::remove_file(&absolute)
            };
            removal.map_err(|source| FilesystemError::Remove {
                path: absolute.clone(),
                source,
            })?;
            info!(path = %relative.display(), directive = op.directive(), "Removed");
        }
        report.removed.push(relative.to_path_buf());
    }

    Ok(report)
}

/// Join `relative` onto `root`, refusing anything that is not a plain
/// descendant.
fn contained_path(root: &Path, relative: &Path) -> std::result::Result<PathBuf, IntegrityError> {
    let plain = relative.components().next().is_some()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    let absolute = root.join(relative);
    if !plain || !absolute.starts_with(root) {
        return Err(IntegrityError::EscapesRoot {
            path: absolute,
            root: root.to_path_buf(),
        });
    }
    Ok(absolute)
}

/// Resolve symlinks in the target's parent and confirm it stays under the root.
fn ensure_parent_inside(canonical_root: &Path, absolute: &Path) -> Result<()> {
    let Some(parent) = absolute.parent() else {
        return Ok(());
    };
    let canonical_parent = fs::canonicalize(parent).map_err(|source| FilesystemError::Remove {
        path: absolute.to_path_buf(),
        source,
    })?;

    if !canonical_parent.starts_with(canonical_root) {
        return Err(IntegrityError::EscapesRoot {
            path: canonical_parent.join(absolute.file_name().unwrap_or_default()),
            root: canonical_root.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;

    fn file(path: &str) -> PruneOp {
        PruneOp::RemoveFile {
            path: PathBuf::from(path),
            directive: "test",
        }
    }

    fn dir(path: &str) -> PruneOp {
        PruneOp::RemoveDir {
            path: PathBuf::from(path),
            directive: "test",
        }
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_plan_orders_files_before_dirs() {
        let plan = PrunePlan::new(vec![dir("a"), file("b"), dir("c"), file("d")]);
        let paths: Vec<_> = plan.paths().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_summary_lists_ops() {
        let plan = PrunePlan::new(vec![file("LICENSE"), dir(".vscode")]);
        let summary = plan.summary();
        assert!(summary.starts_with("Prune Plan: 2 operation(s)"));
        assert!(summary.contains("1. RemoveFile(LICENSE)"));
        assert!(summary.contains("2. RemoveDir(.vscode/)"));
    }

    #[test]
    fn test_apply_removes_files_and_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "LICENSE");
        touch(root, ".vscode/launch.json");
        touch(root, "README.md");

        let plan = PrunePlan::new(vec![file("LICENSE"), dir(".vscode")]);
        let report = apply_plan(root, &plan, PruneOptions::default()).unwrap();

        assert_eq!(report.removed.len(), 2);
        assert!(!root.join("LICENSE").exists());
        assert!(!root.join(".vscode").exists());
        assert!(root.join("README.md").exists());
    }

    #[test]
    fn test_apply_missing_target_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let plan = PrunePlan::new(vec![file("nope.txt"), dir("gone")]);

        let report = apply_plan(tmp.path(), &plan, PruneOptions::default()).unwrap();
        assert!(report.is_noop());
        assert_eq!(report.already_absent.len(), 2);
    }

    #[test]
    fn test_file_inside_removed_dir_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "tests/features/api.feature");

        // Reversed order on purpose: the dir goes first, the file becomes a no-op.
        let plan = PrunePlan {
            ops: vec![dir("tests/features"), file("tests/features/api.feature")],
        };
        let report = apply_plan(tmp.path(), &plan, PruneOptions::default()).unwrap();
        assert_eq!(report.removed, vec![PathBuf::from("tests/features")]);
        assert_eq!(
            report.already_absent,
            vec![PathBuf::from("tests/features/api.feature")]
        );
    }

    #[test]
    fn test_dry_run_keeps_files() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "LICENSE");

        let plan = PrunePlan::new(vec![file("LICENSE")]);
        let report = apply_plan(tmp.path(), &plan, PruneOptions { dry_run: true }).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.removed, vec![PathBuf::from("LICENSE")]);
        assert!(tmp.path().join("LICENSE").exists());
    }

    #[test]
    fn test_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("not-rendered");
        let err = apply_plan(&root, &PrunePlan::default(), PruneOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Filesystem(FilesystemError::MissingRoot { .. })
        ));
    }

    #[test]
    fn test_escaping_path_is_integrity_error() {
        let tmp = tempfile::tempdir().unwrap();
        let outer = tmp.path().join("victim.txt");
        fs::write(&outer, "keep me").unwrap();
        let root = tmp.path().join("project");
        fs::create_dir(&root).unwrap();

        for bad in ["../victim.txt", "", "/etc/hostname"] {
            let plan = PrunePlan::new(vec![file(bad)]);
            let err = apply_plan(&root, &plan, PruneOptions::default()).unwrap_err();
            assert!(
                matches!(err, ScaffoldError::Integrity(IntegrityError::EscapesRoot { .. })),
                "{bad:?} should escape"
            );
        }
        assert!(outer.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_parent_outside_root_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("dependabot.yml"), "keep").unwrap();

        let root = tmp.path().join("project");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join(".github")).unwrap();

        let plan = PrunePlan::new(vec![file(".github/dependabot.yml")]);
        let err = apply_plan(&root, &plan, PruneOptions::default()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Integrity(_)));
        assert!(outside.join("dependabot.yml").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_removal_failure_is_filesystem_error() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "locked/LICENSE");
        let locked = tmp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let plan = PrunePlan::new(vec![file("locked/LICENSE")]);
        let result = apply_plan(tmp.path(), &plan, PruneOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Root ignores directory permissions, so only assert when it was enforced.
        if tmp.path().join("locked/LICENSE").exists() {
            assert!(matches!(
                result,
                Err(ScaffoldError::Filesystem(FilesystemError::Remove { .. }))
            ));
        }
    }
}
