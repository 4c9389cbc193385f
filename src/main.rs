use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use grant_analyzer::record::ErrorEnvelope;
use grant_analyzer::{loader, AnalysisOutcome, Analyzer, Clock, FailurePolicy, Settings, SystemClock};
use tracing::info;

#[derive(Parser)]
#[command(name = "grant_analyzer", about = "Extract structured fields from funding announcements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one announcement and print the JSON record
    Analyze {
        /// Announcement text (omit when using --file)
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,
        /// Document name for inline text (default: GRANT_DOCUMENT_NAME)
        name: Option<String>,
        /// Read the announcement from a plain-text file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Document name for --file (default: the file stem)
        #[arg(long = "name", requires = "file")]
        file_name: Option<String>,
        /// Fail the whole analysis if any field group fails
        #[arg(long)]
        strict: bool,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Analyze many plain-text files in parallel, one JSON line per file
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Fail a document if any of its field groups fails
        #[arg(long)]
        strict: bool,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("reading GRANT_* settings")?;
    info!(?settings, "settings loaded");

    match cli.command {
        Commands::Analyze { text, name, file, file_name, strict, compact } => {
            let analyzer = Analyzer::new(policy(&settings, strict));
            let outcome = match file {
                Some(path) => analyze_file(&analyzer, &path, file_name.as_deref()),
                None => {
                    let name = name.as_deref().unwrap_or(&settings.document_name);
                    analyzer.analyze(text.as_deref().unwrap_or_default(), Some(name))
                }
            };
            emit(&outcome, settings.pretty && !compact)?;
            Ok(exit_code(outcome.is_failure()))
        }
        Commands::Batch { files, strict } => {
            let analyzer = Analyzer::new(policy(&settings, strict));
            let failed = run_batch(&analyzer, &files)?;
            Ok(exit_code(failed > 0))
        }
    }
}

fn policy(settings: &Settings, strict_flag: bool) -> FailurePolicy {
    if strict_flag {
        FailurePolicy::Strict
    } else {
        settings.policy()
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load errors become an error envelope so stdout stays one JSON value per
/// document.
fn analyze_file(analyzer: &Analyzer, path: &Path, name: Option<&str>) -> AnalysisOutcome {
    match loader::load(path) {
        Ok(doc) => analyzer.analyze(&doc.text, Some(name.unwrap_or(&doc.name))),
        Err(err) => AnalysisOutcome::Failed(ErrorEnvelope {
            error: format!("Analysis failed: {}", err),
            document_name: path.display().to_string(),
            timestamp: SystemClock.now(),
        }),
    }
}

fn emit(outcome: &AnalysisOutcome, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(outcome)?
    } else {
        serde_json::to_string(outcome)?
    };
    println!("{}", json);
    Ok(())
}

/// Prints one line per file in input order and returns how many failed.
fn run_batch(analyzer: &Analyzer, files: &[PathBuf]) -> anyhow::Result<usize> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let t0 = Instant::now();
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let outcomes: Vec<AnalysisOutcome> = files
        .par_iter()
        .map(|path| {
            let outcome = analyze_file(analyzer, path, None);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    let mut failed = 0;
    for outcome in &outcomes {
        failed += usize::from(outcome.is_failure());
        emit(outcome, false)?;
    }

    info!(
        documents = outcomes.len(),
        failed,
        elapsed = %format_duration(t0.elapsed()),
        "batch complete"
    );
    Ok(failed)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
