//! Variant Resolver
//!
//! Translates a validated [`Configuration`] into the concrete deletions that
//! turn the maximal rendered tree into the requested project variant.
//!
//! # Design
//!
//! - **Table driven**: every decision comes from a [`RuleTable`] row; there
//!   are no per-feature branches here
//! - **Verified before use**: the table is checked for escaping or malformed
//!   patterns before a single path is touched
//! - **Deterministic**: same configuration, same plan, same order
//!
//! # What This Explicitly Refuses To Do
//!
//! - Rewrite file contents: rendering is the templating engine's job
//! - Create files: the engine must emit every optional file unconditionally
//! - Roll back: a failed pass leaves a partially pruned tree for the caller
//!   to discard

use std::path::Path;
use tracing::{debug, info};

use crate::config::Configuration;
use crate::engine::prune::{apply_plan, PruneOp, PruneOptions, PrunePlan, PruneReport};
use crate::error::{IntegrityError, Result};
use crate::logic::rules::RuleTable;

/// Compute the deletions `config` requires from `table`.
///
/// Pure: no I/O. The table is verified first and every substituted path is
/// checked, so a malformed row fails here rather than halfway through a
/// pruning pass.
pub fn plan_removals(
    table: RuleTable,
    config: &Configuration,
) -> std::result::Result<PrunePlan, IntegrityError> {
    table.verify()?;

    let mut ops = Vec::new();
    for directive in table.matching(config) {
        debug!(directive = directive.name, condition = %directive.condition, "Directive fires");
        for target in directive.targets {
            let path = target.resolve(config)?;
            ops.push(if target.is_dir() {
                PruneOp::RemoveDir {
                    path,
                    directive: directive.name,
                }
            } else {
                PruneOp::RemoveFile {
                    path,
                    directive: directive.name,
                }
            });
        }
    }

    Ok(PrunePlan::new(ops))
}

/// Prune the rendered tree at `root` with the standard rule table.
pub fn prune_tree(
    root: &Path,
    config: &Configuration,
    options: PruneOptions,
) -> Result<PruneReport> {
    prune_tree_with(RuleTable::standard(), root, config, options)
}

/// Prune the rendered tree at `root` with an explicit rule table.
pub fn prune_tree_with(
    table: RuleTable,
    root: &Path,
    config: &Configuration,
    options: PruneOptions,
) -> Result<PruneReport> {
    let plan = plan_removals(table, config)?;
    debug!("{}", plan.summary());

    let report = apply_plan(root, &plan, options)?;
    info!(
        root = %root.display(),
        removed = report.removed.len(),
        already_absent = report.already_absent.len(),
        dry_run = report.dry_run,
        "Variant resolution complete"
    );
    Ok(report)
}
