//! CLI entrypoint for nlp-quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use nlp_quorum_application::{
    CompositeVotingObserver, MeasureAgreementUseCase, RunVotingInput, RunVotingUseCase,
    VotingObserver, load_all,
};
use nlp_quorum_infrastructure::{ConfigLoader, JsonFileOutputLoader, JsonlVotingLogger};
use nlp_quorum_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("Config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let issues = file_config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<&str> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    let (voting_config, _) = file_config.voting.to_voting_config();
    let voting_config = cli.apply_overrides(voting_config);
    let output_config =
        OutputConfig::resolve(&cli, file_config.output.format, file_config.output.color);
    if !output_config.color {
        colored::control::set_override(false);
    }

    if cli.files.is_empty() {
        bail!("No input files given. Pass one or more processor output JSON files.");
    }

    // === Dependency Injection ===
    let use_case = RunVotingUseCase::new(voting_config)?;
    let loader = JsonFileOutputLoader::new();
    let outputs = load_all(&loader, &cli.files).await?;
    info!(
        "Loaded {} processor outputs from {} files",
        outputs.len(),
        cli.files.len()
    );

    let report = if cli.report {
        match MeasureAgreementUseCase::new().execute(&outputs) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Agreement report skipped: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut input = RunVotingInput::new(outputs);
    if cli.sequential {
        input = input.sequential();
    }

    // Observers: progress display and optional JSONL event log
    let progress: Option<Box<dyn VotingObserver>> = if !output_config.show_progress {
        None
    } else if std::io::stderr().is_terminal() {
        Some(Box::new(ProgressReporter::new()))
    } else {
        Some(Box::new(SimpleProgress))
    };
    let event_log = cli.log_file.as_ref().and_then(JsonlVotingLogger::new);

    let mut delegates: Vec<&dyn VotingObserver> = Vec::new();
    if let Some(progress) = &progress {
        delegates.push(progress.as_ref());
    }
    if let Some(logger) = &event_log {
        delegates.push(logger);
    }
    let observer = CompositeVotingObserver::new(delegates);

    let result = use_case.execute_with_observer(input, &observer).await?;

    // Output results
    let output = match output_config.format {
        OutputFormat::Summary => {
            let mut output = ConsoleFormatter::format(&result);
            if let Some(report) = &report {
                output.push_str(&ConsoleFormatter::format_report(report));
            }
            output
        }
        OutputFormat::Json => ConsoleFormatter::format_json(&result, report.as_ref()),
    };

    println!("{}", output);

    Ok(())
}
