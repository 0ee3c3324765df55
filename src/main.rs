//! scaffold-variants - entry point
//!
//! Runs as a template engine hook: `validate` before rendering, `prune`
//! after. Exit status tells the engine whether to continue.

use anyhow::Context;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use scaffold_variants::cli::{Cli, Commands, ConfigArgs};
use scaffold_variants::engine::prune::PruneOptions;
use scaffold_variants::error::{ScaffoldError, EXIT_CONFIGURATION};
use scaffold_variants::logic::resolver::{plan_removals, prune_tree};
use scaffold_variants::logic::rules::RuleTable;
use scaffold_variants::template_context::TemplateContext;
use scaffold_variants::validator::{validate_with, Accepted};

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays
/// clean for `plan` and `context` output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    debug!("CLI arguments parsed");

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ ERROR: {:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Library errors carry their own exit code; anything else (unreadable
/// config file, bad JSON) is the user's input and maps to 1.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ScaffoldError>())
        .map(ScaffoldError::exit_code)
        .unwrap_or(EXIT_CONFIGURATION)
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Validate { input } => {
            let accepted = accept(&input)?;
            println!(
                "✓ Configuration is valid: {} (package {})",
                accepted.config.kebab_name(),
                accepted.config.snake_name()
            );
        }
        Commands::Prune {
            project_dir,
            input,
            dry_run,
        } => {
            let accepted = accept(&input)?;
            info!(root = %project_dir.display(), dry_run, "Pruning generated project");

            let report = prune_tree(&project_dir, &accepted.config, PruneOptions { dry_run })
                .map_err(anyhow::Error::new)
                .with_context(|| format!("Pruning {} failed", project_dir.display()))?;

            let verb = if report.dry_run { "Would remove" } else { "Removed" };
            for path in &report.removed {
                println!("  {} {}", verb, path.display());
            }
            println!(
                "✓ {} path(s) {}, {} already absent",
                report.removed.len(),
                if report.dry_run { "to remove" } else { "removed" },
                report.already_absent.len()
            );
        }
        Commands::Plan { input } => {
            let accepted = accept(&input)?;
            let plan = plan_removals(RuleTable::standard(), &accepted.config)
                .map_err(ScaffoldError::from)?;
            println!("{}", plan.summary());
        }
        Commands::Context { input } => {
            let accepted = accept(&input)?;
            let context = TemplateContext::from_configuration(&accepted.config);
            println!("{}", context.to_json_pretty()?);
        }
    }
    Ok(())
}

/// Load and validate, printing advisories as warnings.
fn accept(input: &ConfigArgs) -> anyhow::Result<Accepted> {
    let raw = input.load()?;
    let accepted =
        validate_with(&raw, input.validator_options()).map_err(ScaffoldError::from)?;

    for advisory in &accepted.advisories {
        eprintln!("⚠ WARNING: {}", advisory);
    }
    Ok(accepted)
}
