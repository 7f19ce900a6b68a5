mod cli;
mod logging;
mod prompt;
mod reporter;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dotenv::dotenv;
use fuzzy_duper::stats::MatchSummary;
use fuzzy_duper::{config, similarity, AppConfig, MatchEngine, ReconcileStats};
use reporter::CliReporter;
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let mut config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    args.overrides.apply(&mut config);

    let result = match args.command {
        Some(Commands::Process) => run_process(config, args.overrides.yes),
        Some(Commands::Cluster) => run_cluster(config),
        Some(Commands::Materialize) => run_materialize(config, args.overrides.yes),
        Some(Commands::Normalize { names }) => {
            let normalizer = config.normalizer();
            for name in names {
                println!("{} -> {}", name, normalizer.normalize(&name).green());
            }
            Ok(())
        }
        Some(Commands::Compare { first, second }) => {
            run_compare(&config, &first, &second);
            Ok(())
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_process(config: AppConfig, assume_yes: bool) -> Result<()> {
    if !confirm_rebuild(&config, assume_yes)? {
        return Ok(());
    }

    let engine = MatchEngine::new(config);
    let reporter = CliReporter::new();
    let result = engine.run(&reporter).context("Error processing files")?;

    print_summary(&result.summary);
    Ok(())
}

fn run_cluster(config: AppConfig) -> Result<()> {
    let engine = MatchEngine::new(config);
    let reporter = CliReporter::new();
    let result = engine.cluster(&reporter).context("Error clustering files")?;

    print_summary(&result.summary);
    Ok(())
}

fn run_materialize(config: AppConfig, assume_yes: bool) -> Result<()> {
    if !confirm_rebuild(&config, assume_yes)? {
        return Ok(());
    }

    let clusters_file = config.clusters_file.clone();
    let engine = MatchEngine::new(config);
    let reporter = CliReporter::new();
    let stats = engine
        .materialize_saved(&reporter)
        .with_context(|| format!("Error materializing '{}'", clusters_file.display()))?;

    print_reconcile(&stats);
    Ok(())
}

fn run_compare(config: &AppConfig, first: &str, second: &str) {
    let normalizer = config.normalizer();
    let a = normalizer.normalize(first);
    let b = normalizer.normalize(second);
    let score = similarity(&a, &b);
    let score_text = if score >= config.threshold {
        score.to_string().green()
    } else {
        score.to_string().red()
    };

    println!("{} -> {}", first, a.cyan());
    println!("{} -> {}", second, b.cyan());
    println!("similarity: {} (threshold {})", score_text, config.threshold);
}

/// Ask before wiping an existing destination, unless `--yes` was given.
fn confirm_rebuild(config: &AppConfig, assume_yes: bool) -> Result<bool> {
    if assume_yes || !config.destination_root.exists() {
        return Ok(true);
    }

    let question = format!(
        "'{}' exists and will be DELETED and rebuilt. Continue?",
        config.destination_root.display()
    );
    let answer = prompt::confirm(&question, false)?;
    if !answer {
        info!("Aborted, '{}' left untouched", config.destination_root.display());
    }
    Ok(answer)
}

fn print_summary(summary: &MatchSummary) {
    println!();
    info!(
        "Scan: {}, Cluster: {}",
        format!("{:.2}s", summary.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.cluster_duration.as_secs_f64()).green(),
    );
    info!(
        "{} files, {} unique, {} collisions",
        format!("{}", summary.total_files).cyan(),
        format!("{}", summary.unique_files).cyan(),
        format!("{}", summary.collisions).red(),
    );
    info!(
        "{} without collisions, {} with collisions",
        format!("{}", summary.clusters_without_collisions).cyan(),
        format!("{}", summary.clusters_with_collisions).red(),
    );
    if let Some(stats) = &summary.reconcile {
        print_reconcile(stats);
    }
}

fn print_reconcile(stats: &ReconcileStats) {
    info!(
        "{} folders, {} files copied, {} renamed",
        format!("{}", stats.folders_created).cyan(),
        format!("{}", stats.files_copied).green(),
        format!("{}", stats.files_renamed).yellow(),
    );
    if stats.sources_missing + stats.copy_failures + stats.folder_failures > 0 {
        info!(
            "{} missing sources, {} failed copies, {} failed folders",
            format!("{}", stats.sources_missing).red(),
            format!("{}", stats.copy_failures).red(),
            format!("{}", stats.folder_failures).red(),
        );
    }
}
