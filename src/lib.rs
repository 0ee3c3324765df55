//! scaffold-variants library
//!
//! Validates project template inputs and prunes the rendered tree down to the
//! variant the user asked for.

pub mod cli;
pub mod config;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod generation_state;
pub mod logic;
pub mod pipeline;
pub mod template_context;
pub mod types;
pub mod validator;

// Re-export main types for convenience
pub use config::{Configuration, ProjectIdentifiers, PythonVersion};
pub use config_file::{RawConfiguration, RawOverrides};
pub use engine::prune::{apply_plan, PruneOp, PruneOptions, PrunePlan, PruneReport};
pub use error::{ConfigurationError, FilesystemError, IntegrityError, ScaffoldError};
pub use generation_state::{GenerationContext, GenerationStage, GenerationTransitionError};
pub use logic::resolver::{plan_removals, prune_tree, prune_tree_with};
pub use logic::rules::{Condition, RemovalDirective, RuleTable, Target, STANDARD_DIRECTIVES};
pub use pipeline::{GenerationOutcome, Pipeline, PipelineOptions, TemplateRenderer};
pub use template_context::TemplateContext;
pub use types::{DevelopmentEnvironment, Feature, License, Toggle};
pub use validator::{validate, validate_with, Accepted, Advisory, ValidatorOptions};
