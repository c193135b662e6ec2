//! The `analyze` command: gathering passwords, scoring them, and presenting the verdicts.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, ArgGroup};
use console::{style, Term};
use serde::Serialize;

use crate::table::{display_table, TableDisplay};
use crate::ProgError;
use password_zen::analysis::{AnalysisResult, CheckOutcome};
use password_zen::report::{self, CHECK_MARK, CROSS_MARK};
use password_zen::{AnalysisCriteria, BatchReport, Secret, Tier};

#[derive(clap::Args)]
#[command(group(
    ArgGroup::new("source")
        .args(["password", "file", "prompt"])
        .multiple(false)
))]
pub(crate) struct AnalyzeArgs {
    /// Password to analyze.
    #[arg(short, long)]
    password: Option<String>,
    /// Text file containing passwords to analyze, one per line.
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Read the password from the terminal without echoing it.
    #[arg(long)]
    prompt: bool,
    /// Output file for a plain-text analysis report.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Minimum length for passwords.
    #[arg(short, long, default_value_t = 8)]
    min_length: usize,
    /// Require special characters.
    #[arg(
        short = 's',
        long,
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    require_symbols: bool,
    /// Require digits.
    #[arg(
        short = 'd',
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    require_digits: bool,
    /// Require uppercase letters.
    #[arg(
        short = 'u',
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    require_uppercase: bool,
    /// Require lowercase letters.
    #[arg(
        short = 'l',
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    require_lowercase: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Disable the progress animation.
    #[arg(long)]
    no_animation: bool,
    /// Print the results as JSON instead of text.
    #[arg(long, conflicts_with = "table")]
    json: bool,
    /// Print one table row per password instead of the per-check detail.
    #[arg(long)]
    table: bool,
}

impl AnalyzeArgs {
    fn criteria(&self) -> AnalysisCriteria {
        AnalysisCriteria {
            min_length: self.min_length,
            require_symbols: self.require_symbols,
            require_digits: self.require_digits,
            require_uppercase: self.require_uppercase,
            require_lowercase: self.require_lowercase,
        }
    }
}

pub(crate) fn analyze_passwords(args: AnalyzeArgs) -> Result<(), ProgError> {
    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let passwords = collect_passwords(&args)?;
    let criteria = args.criteria();
    let batch = password_zen::analyze_batch(&passwords, &criteria);

    if args.json {
        print_json(&batch, &criteria)?;
    } else if args.table {
        print_table(&batch)?;
        print_summary(&batch, args.no_color);
    } else {
        let term = Term::stderr();
        for (idx, result) in batch.results.iter().enumerate() {
            if args.no_animation {
                eprintln!("Analyzing password {}...", idx + 1);
            } else if term.is_term() {
                animate_analysis(&term, idx + 1).context("failed to draw progress")?;
            }
            print_result(idx, result, &criteria);
        }
        print_summary(&batch, args.no_color);
    }

    if let Some(output) = args.output.as_deref() {
        report::write_report(output, &report::render_plain(&batch, &criteria))?;
        eprintln!("Analysis results written to {}", output.display());
    }
    Ok(())
}

fn collect_passwords(args: &AnalyzeArgs) -> Result<Vec<String>, ProgError> {
    if let Some(file) = args.file.as_deref() {
        eprintln!("Analyzing passwords from file: {}", file.display());
        return Ok(password_zen::input::read_passwords(file)?);
    }
    if args.prompt {
        let password = Secret::from(
            rpassword::prompt_password("Password: ").context("failed to read password from TTY")?,
        );
        return Ok(vec![password.as_str().to_owned()]);
    }
    match args.password.as_deref() {
        Some(password) if !password.is_empty() => Ok(vec![password.to_owned()]),
        _ => Err(password_zen::Error::no_input().into()),
    }
}

fn animate_analysis(term: &Term, number: usize) -> io::Result<()> {
    for dots in [".", "..", "..."] {
        term.clear_line()?;
        term.write_str(&format!(
            "{} Analyzing password {}{}",
            style("»").cyan().bold(),
            number,
            dots
        ))?;
        thread::sleep(Duration::from_millis(200));
    }
    term.clear_line()
}

fn print_result(idx: usize, result: &AnalysisResult, criteria: &AnalysisCriteria) {
    let status = if result.passed {
        format!(
            "{} {}",
            style("STRONG").green(),
            style(CHECK_MARK).green().bold()
        )
    } else {
        format!("{} {}", style("WEAK").red(), style(CROSS_MARK).red().bold())
    };
    println!("{} {}: {}", style("Password").cyan().bold(), idx + 1, status);
    for check in &result.checks {
        println!(
            "  {} {}",
            styled_mark(check),
            check.describe(result.length, criteria)
        );
    }
    println!();
}

fn styled_mark(check: &CheckOutcome) -> console::StyledObject<&'static str> {
    if check.satisfied {
        style(CHECK_MARK).green().bold()
    } else {
        style(CROSS_MARK).red().bold()
    }
}

fn print_summary(batch: &BatchReport, no_color: bool) {
    if no_color {
        println!("{}", report::summary_line(batch.passed, batch.total));
        return;
    }
    let tier = batch.tier();
    let headline = report::summary_headline(tier, batch.passed, batch.total);
    let headline = match tier {
        Tier::Excellent => style(headline).green(),
        Tier::Good => style(headline).yellow(),
        Tier::Warning => style(headline).red(),
    };
    println!("{}", headline);
}

struct ResultRow {
    number: String,
    length: String,
    verdict: String,
    failed: String,
}

impl ResultRow {
    fn new(idx: usize, result: &AnalysisResult) -> ResultRow {
        let failed = result
            .failed_checks()
            .map(|check| check.criterion.name())
            .collect::<Vec<_>>()
            .join(", ");
        ResultRow {
            number: (idx + 1).to_string(),
            length: result.length.to_string(),
            verdict: format!(
                "{} {}",
                report::verdict(result),
                report::mark(result.passed)
            ),
            failed,
        }
    }
}

impl TableDisplay for ResultRow {
    fn columns() -> usize {
        4
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "Password",
            1 => "Length",
            2 => "Verdict",
            3 => "Failed checks",
            _ => panic!("no such column: {column_index}"),
        }
    }

    fn item(&self, column_index: usize) -> &str {
        match column_index {
            0 => &self.number,
            1 => &self.length,
            2 => &self.verdict,
            3 => &self.failed,
            _ => panic!("no such column: {column_index}"),
        }
    }
}

fn print_table(batch: &BatchReport) -> anyhow::Result<()> {
    let rows = batch
        .results
        .iter()
        .enumerate()
        .map(|(idx, result)| ResultRow::new(idx, result))
        .collect::<Vec<_>>();
    display_table(&rows, io::stdout().lock()).context("failed to output table")?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    criteria: &'a AnalysisCriteria,
    results: &'a [AnalysisResult],
    passed: usize,
    total: usize,
    tier: Tier,
}

fn print_json(batch: &BatchReport, criteria: &AnalysisCriteria) -> anyhow::Result<()> {
    let json = JsonReport {
        criteria,
        results: &batch.results,
        passed: batch.passed,
        total: batch.total,
        tier: batch.tier(),
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &json).context("failed to write JSON to stdout")?;
    writeln!(stdout).context("failed to write JSON to stdout")?;
    Ok(())
}
