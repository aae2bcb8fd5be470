//! kro CLI - check ResourceGraphDefinition files from the command line

mod json;

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use kro_core::{validate_project, FileDiagnostic, LintConfig, Severity, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kro")]
#[command(author, version)]
#[command(
    about = "Validate kro ResourceGraphDefinition files",
    long_about = "Validate kro ResourceGraphDefinition files.\n\nChecks: YAML syntax, embedded {{ }} expressions, required fields"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ./.kro-lsp.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate files and directories
    Check {
        /// Paths to validate
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Initialize config file
    Init {
        /// Output path for config
        #[arg(default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Check { paths, format } => check_command(paths, *format, &cli),
        Commands::Init { output } => init_command(output),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("KRO_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<LintConfig> {
    match &cli.config {
        Some(path) => Ok(LintConfig::load(path)?),
        None => {
            let local = Path::new(CONFIG_FILE_NAME);
            Ok(LintConfig::load_or_default(local.exists().then_some(local)))
        }
    }
}

/// Returns `Ok(false)` when any error-level diagnostic was found.
fn check_command(paths: &[PathBuf], format: OutputFormat, cli: &Cli) -> anyhow::Result<bool> {
    let config = load_config(cli)?;

    let mut diagnostics = Vec::new();
    for path in paths {
        if !path.exists() {
            anyhow::bail!("path does not exist: {}", path.display());
        }
        tracing::debug!(path = %path.display(), "checking");
        diagnostics.extend(validate_project(path, &config)?);
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.diagnostic.severity == Severity::Error)
        .count();

    match format {
        OutputFormat::Json => {
            let base = std::env::current_dir()?;
            let output = json::diagnostics_to_json(&diagnostics, &base);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_text(&diagnostics, cli.verbose),
    }

    Ok(errors == 0)
}

fn print_text(diagnostics: &[FileDiagnostic], verbose: bool) {
    if diagnostics.is_empty() {
        println!("{}", "✓ No issues found".green().bold());
        return;
    }

    let count = |severity: Severity| {
        diagnostics
            .iter()
            .filter(|d| d.diagnostic.severity == severity)
            .count()
    };
    let errors = count(Severity::Error);
    let warnings = count(Severity::Warning);

    for FileDiagnostic { file, diagnostic } in diagnostics {
        let level_str = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info | Severity::Hint => {
                json::severity_to_string(diagnostic.severity).blue().bold()
            }
        };

        println!(
            "{}:{}:{} {}[{}]: {}",
            file.display().to_string().dimmed(),
            diagnostic.range.start.line + 1,
            diagnostic.range.start.character + 1,
            level_str,
            diagnostic.source,
            diagnostic.message
        );

        if verbose {
            println!("  {} {}", "rule:".dimmed(), diagnostic.rule.dimmed());
            if let Some(suggestion) = &diagnostic.suggestion {
                println!("  {} {}", "help:".cyan(), suggestion);
            }
        }
    }

    println!();
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "Found {} {}, {} {}",
        errors,
        if errors == 1 { "error" } else { "errors" },
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }
    );
}

fn init_command(output: &Path) -> anyhow::Result<bool> {
    let default_config = LintConfig::default();
    let toml_content = toml::to_string_pretty(&default_config)?;

    std::fs::write(output, toml_content)?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(true)
}
