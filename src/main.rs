use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use ignore::WalkBuilder;
use serde::Serialize;
use tracing::{debug, error};

use phpsniff::{Diagnostic, Severity, authors, lint_source};

/// PHP coding-standard sniffer.
#[derive(Parser)]
#[command(name = "phpsniff", version, about)]
struct Cli {
    /// Files or directories to check (directories are walked for .php files).
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Author allow-list file.
    #[arg(long, default_value = "AUTHORS.txt")]
    authors: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Suppress per-diagnostic output; only the exit code is reported.
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct FileReport {
    file: String,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let allow_list = authors::load_allow_list(&cli.authors);
    debug!(authors = allow_list.len(), "loaded author allow-list");

    let mut reports = Vec::new();
    let mut failed = false;

    for file in collect_php_files(&cli.paths) {
        let source = match std::fs::read_to_string(&file) {
            Ok(source) => source,
            Err(err) => {
                error!(file = %file.display(), %err, "cannot read file");
                failed = true;
                continue;
            }
        };

        let diagnostics = lint_source(&file, &source, allow_list.clone());
        if diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
        {
            failed = true;
        }
        if !diagnostics.is_empty() {
            reports.push(FileReport {
                file: file.display().to_string(),
                diagnostics,
            });
        }
    }

    if !cli.quiet {
        match cli.format {
            Format::Text => print_text(&reports),
            Format::Json => match serde_json::to_string_pretty(&reports) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    error!(%err, "cannot serialize diagnostics");
                    failed = true;
                }
            },
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_text(reports: &[FileReport]) {
    for report in reports {
        for d in &report.diagnostics {
            let severity = match d.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            println!(
                "{}:{}: {} [{}] {}",
                report.file, d.line, severity, d.code, d.message
            );
        }
    }
}

/// Expand the given paths: files are taken as-is, directories are walked
/// (respecting ignore files) for `.php` sources.
fn collect_php_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkBuilder::new(path).build().flatten() {
            if entry.file_type().is_some_and(|t| t.is_file()) && is_php(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files
}

fn is_php(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "php")
}
