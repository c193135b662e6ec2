use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod analyze;
mod generate;
mod table;

/// A command-line tool for secure password generation and password strength analysis.
#[derive(Parser)]
#[command(
    name = "password-zen",
    version = password_zen::version::short(),
    long_version = password_zen::version::info()
)]
enum Args {
    /// Generate a cryptographically secure password.
    Generate(generate::GenerateArgs),
    /// Check one or more passwords against length and character-class requirements, optionally
    /// writing a plain-text report.
    Analyze(analyze::AnalyzeArgs),
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args {
        Args::Generate(args) => generate::generate_password(args)?,
        Args::Analyze(args) => analyze::analyze_passwords(args)?,
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("password_zen=warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            tracing::debug!(?err, "exiting with error");
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{0}")]
    PasswordZen(password_zen::Error),
    #[error("{0:#}")]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<password_zen::Error> for ProgError {
    fn from(err: password_zen::Error) -> ProgError {
        ProgError::PasswordZen(err)
    }
}
