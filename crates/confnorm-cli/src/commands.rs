use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use confnorm_diff::{diff_configs, ConfigChange};
use confnorm_document::{ConfigDocument, DEFAULT_CACHE_NAME};
use confnorm_flatten::{FlattenOptions, Flattener};
use confnorm_model::FlatConfig;
use confnorm_registry::{ManagerHandle, Registry, View};
use tracing::debug;

use crate::cli::*;

/// Every document is registered as the only manager of a fresh registry.
const DOCUMENT: ManagerHandle = ManagerHandle(0);

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Normalize(args) => cmd_normalize(args),
        Command::Diff(args) => cmd_diff(args),
    }
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let map = normalize(&args)?;
    let format = args.format.into();
    match &args.output {
        Some(path) => {
            confnorm_store::save(format, &map, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Wrote {} entries to {}",
                "✓".green().bold(),
                map.len().to_string().bold(),
                path.display()
            );
        }
        None => confnorm_store::write(format, &map, &mut io::stdout().lock())?,
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let old = load_registry(&args.old, Flattener::default())?.normalized_config(DOCUMENT)?;
    let new = load_registry(&args.new, Flattener::default())?.normalized_config(DOCUMENT)?;
    let diff = diff_configs(&old, &new);

    if diff.is_empty() {
        println!("No changes.");
        return Ok(());
    }
    for change in &diff.changes {
        match change {
            ConfigChange::Added { key, value } => {
                println!("  {} {} = {}", "+".green().bold(), key, value.green());
            }
            ConfigChange::Removed { key, value } => {
                println!("  {} {} = {}", "-".red().bold(), key, value.red());
            }
            ConfigChange::Modified { key, old, new } => {
                println!("  {} {}: {} -> {}", "~".yellow().bold(), key, old.red(), new.green());
            }
        }
    }
    println!(
        "\n{} added, {} removed, {} modified",
        diff.additions().to_string().green(),
        diff.removals().to_string().red(),
        diff.modifications().to_string().yellow()
    );
    Ok(())
}

fn normalize(args: &NormalizeArgs) -> anyhow::Result<FlatConfig> {
    let mut options = if args.no_cycle_check {
        FlattenOptions::unguarded()
    } else {
        FlattenOptions::default()
    };
    options.max_depth = args.max_depth;
    let registry = load_registry(&args.config, Flattener::new(options))?;
    let view = selected_view(args);
    debug!(%view, prefix = %args.prefix, "normalizing document");
    Ok(registry.normalize(DOCUMENT, &view, &args.prefix)?)
}

fn selected_view(args: &NormalizeArgs) -> View {
    let section = if args.cache.is_some() { Section::Cache } else { args.section };
    match section {
        Section::All => View::All,
        Section::Global => View::Global,
        Section::Jgroups => View::Transport,
        Section::Cache => View::Cache(
            args.cache.clone().unwrap_or_else(|| DEFAULT_CACHE_NAME.to_string()),
        ),
    }
}

fn load_registry(path: &Path, flattener: Flattener) -> anyhow::Result<Registry> {
    let doc = ConfigDocument::load(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let registry = Registry::with_flattener(flattener);
    registry.register_manager(
        DOCUMENT,
        Some(path.display().to_string()),
        Arc::new(doc.global().clone()),
    )?;
    for (name, config) in doc.caches() {
        registry.register_cache(DOCUMENT, name, Arc::new(config.clone()))?;
    }
    if let Some(stack) = doc.transport() {
        registry.set_transport(DOCUMENT, Arc::new(stack.clone()))?;
    }
    Ok(registry)
}
