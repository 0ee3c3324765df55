//! Generation pipeline: validate, render, prune.
//!
//! The render step belongs to an external templating engine and is reached
//! through the [`TemplateRenderer`] trait. The pipeline only guarantees the
//! ordering around it: nothing is rendered for a rejected configuration and
//! nothing is pruned before rendering finished.

use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config_file::RawConfiguration;
use crate::engine::prune::{PruneOptions, PruneReport};
use crate::error::Result;
use crate::generation_state::{GenerationContext, GenerationStage};
use crate::logic::resolver::prune_tree_with;
use crate::logic::rules::RuleTable;
use crate::template_context::TemplateContext;
use crate::validator::{validate_with, Advisory, ValidatorOptions};

/// Contract for the templating engine.
///
/// # Contract
///
/// - Render every optional file unconditionally; pruning is not the
///   renderer's concern
/// - Place the project under `output_dir/<project_dir_name>`
/// - Return that project root
pub trait TemplateRenderer {
    fn render(&self, context: &TemplateContext, output_dir: &Path) -> Result<PathBuf>;
}

/// Per-run settings
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub validator: ValidatorOptions,
    pub prune: PruneOptions,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub project_root: PathBuf,
    pub advisories: Vec<Advisory>,
    pub report: PruneReport,
    pub stages: Vec<GenerationStage>,
}

pub struct Pipeline<R> {
    renderer: R,
    table: RuleTable,
    options: PipelineOptions,
}

impl<R: TemplateRenderer> Pipeline<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            table: RuleTable::standard(),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_rule_table(mut self, table: RuleTable) -> Self {
        self.table = table;
        self
    }

    /// Run one generation into `output_dir`.
    ///
    /// # Errors
    ///
    /// Whatever the failing stage produced. The stage machine is marked
    /// failed and the error returned unchanged; a partially pruned tree is
    /// left for the caller to discard.
    pub fn run(&self, raw: &RawConfiguration, output_dir: &Path) -> Result<GenerationOutcome> {
        let mut ctx = GenerationContext::new();
        match self.run_stages(&mut ctx, raw, output_dir) {
            Ok((project_root, advisories, report)) => Ok(GenerationOutcome {
                project_root,
                advisories,
                report,
                stages: ctx.history().to_vec(),
            }),
            Err(e) => {
                error!(stage = %ctx.current_stage(), "Generation failed: {}", e);
                // Already terminal only if the machine itself refused a transition
                let _ = ctx.fail();
                Err(e)
            }
        }
    }

    fn run_stages(
        &self,
        ctx: &mut GenerationContext,
        raw: &RawConfiguration,
        output_dir: &Path,
    ) -> Result<(PathBuf, Vec<Advisory>, PruneReport)> {
        ctx.transition_to(GenerationStage::Validating)?;
        let accepted = validate_with(raw, self.options.validator)?;
        for advisory in &accepted.advisories {
            warn!(code = advisory.code(), "{}", advisory);
        }
        let context = TemplateContext::from_configuration(&accepted.config);

        ctx.transition_to(GenerationStage::Rendering)?;
        info!(project = context.project_dir_name(), "Rendering template");
        let project_root = self.renderer.render(&context, output_dir)?;

        ctx.transition_to(GenerationStage::Pruning)?;
        let report = prune_tree_with(
            self.table,
            &project_root,
            &accepted.config,
            self.options.prune,
        )?;

        ctx.transition_to(GenerationStage::Completed)?;
        Ok((project_root, accepted.advisories, report))
    }
}
