//! # edcl-cli
//!
//! Command-line interface for issuing credentials from an EDCL workbook.
//!
//! Reads `config.toml` (or the path given with `--config`), overridden by
//! `EDCL_*` environment variables, opens the configured workbook and runs
//! one command against it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use edcl_core::{
    AppConfig, CredentialAssembler, CredentialData, CredentialError, DocumentKind, Issuer,
    UnsignedIssuer, Vocabularies,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// edcl2ebsi - issue credentials from an EDCL workbook
#[derive(Parser)]
#[command(name = "edcl2ebsi")]
#[command(author, version, about = "Issue credentials from an EDCL workbook", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue the credential TITLE to the student EMAIL
    Issue {
        /// Output file
        #[arg(short = 'f', long = "file", value_name = "OUT")]
        file: PathBuf,
        email: String,
        title: String,
    },
    /// Issue an identity credential to the student EMAIL
    Id {
        /// Output file
        #[arg(short = 'f', long = "file", value_name = "OUT")]
        file: PathBuf,
        email: String,
    },
    /// List the credential titles of a student
    List { email: String },
    /// Check whether a student is in the workbook
    Exists { email: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", error_label(&e).red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration: {}", cli.config.display()))?;
    tracing::debug!("Configuration: {:?}", config);
    let data = CredentialData::open(&config.workbook)
        .with_context(|| format!("Failed to open workbook: {}", config.workbook.display()))?;

    match cli.command {
        Command::Issue { file, email, title } => {
            let vocabularies = issue_vocabularies(&config)?;
            let assembler = CredentialAssembler::new(&data, &vocabularies, email).with_title(title);
            issue(&config, DocumentKind::Europass, &assembler, &file)?;
        }
        Command::Id { file, email } => {
            let vocabularies = issue_vocabularies(&config)?;
            let assembler = CredentialAssembler::new(&data, &vocabularies, email);
            issue(&config, DocumentKind::VerifiableId, &assembler, &file)?;
        }
        Command::List { email } => {
            let titles = data.list_credential_titles(&email)?;
            if titles.is_empty() {
                eprintln!("No credentials for {email}");
            }
            for title in titles {
                println!("{title}");
            }
        }
        Command::Exists { email } => {
            let exists = data.student_exists(&email);
            println!("{exists}");
            if !exists {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn issue_vocabularies(config: &AppConfig) -> Result<Vocabularies> {
    Vocabularies::from_source(&config.vocabulary).context("Failed to load vocabulary tables")
}

fn issue(
    config: &AppConfig,
    kind: DocumentKind,
    assembler: &CredentialAssembler<'_>,
    file: &Path,
) -> Result<()> {
    let proof = config.proof_parameters()?;
    let credential = UnsignedIssuer::new().issue(kind, &proof, assembler)?;
    write_output(file, &credential)?;
    println!("{kind} credential written to {}", file.display());
    Ok(())
}

fn write_output(file: &Path, contents: &str) -> Result<()> {
    std::fs::write(file, contents)
        .with_context(|| format!("Failed to write file: {}", file.display()))
}

/// Label an error by its kind: a workbook that does not have the expected
/// layout, or a lookup that found nothing.
fn error_label(error: &anyhow::Error) -> &'static str {
    let credential_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CredentialError>());

    match credential_error {
        Some(e) if e.is_not_found() => "Required data missing:",
        Some(e) if e.is_structure() => "Invalid workbook:",
        _ => "Error:",
    }
}
