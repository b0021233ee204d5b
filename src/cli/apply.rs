use std::path::PathBuf;

use clap::Args;

use crate::apply::adapter::{apply_matches, ApplyReport, ApplyStatus, DryRunWriter};
use crate::apply::copper::CopperWriter;
use crate::cli::OutputFormat;
use crate::parsing::json;

#[derive(Args)]
pub struct ApplyArgs {
    /// Match report (or bare matches array) produced by `crm-link match`
    #[arg(long)]
    pub matches: PathBuf,

    /// JSON file with manual overrides: [{"company_id": ..., "account_order_id": ...}]
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Log the writes without performing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the apply subcommand
///
/// # Errors
///
/// Returns an error if the input files cannot be loaded or, outside
/// `--dry-run`, when CRM credentials are not configured. Individual write
/// failures do not error the command; they are reported per entry.
pub fn run(args: ApplyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let matches = json::load_matches(&args.matches)?;
    let overrides = args
        .overrides
        .as_ref()
        .map(|path| json::load_overrides(path))
        .transpose()?
        .unwrap_or_default();

    if verbose {
        eprintln!(
            "Applying {} matches and {} overrides{}",
            matches.len(),
            overrides.len(),
            if args.dry_run { " (dry run)" } else { "" }
        );
    }

    let report = if args.dry_run {
        apply_matches(&DryRunWriter, &matches, &overrides)
    } else {
        let writer = CopperWriter::from_env()?;
        apply_matches(&writer, &matches, &overrides)
    };

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    if report.failed > 0 {
        eprintln!(
            "{} of {} writes failed; rerun with the failing entries to retry",
            report.failed,
            report.outcomes.len()
        );
    }

    Ok(())
}

fn print_text_report(report: &ApplyReport) {
    println!(
        "Applied {} of {} entries ({} failed, {} rejected)",
        report.applied,
        report.outcomes.len(),
        report.failed,
        report.rejected
    );
    for outcome in &report.outcomes {
        let status = match outcome.status {
            ApplyStatus::Applied => "ok",
            ApplyStatus::Failed => "FAILED",
            ApplyStatus::Rejected => "rejected",
        };
        match (&outcome.account_order_id, &outcome.error) {
            (Some(value), None) => {
                println!("  {:<8} {} <- {}", status, outcome.company_id, value);
            }
            (Some(value), Some(err)) => {
                println!(
                    "  {:<8} {} <- {}: {}",
                    status, outcome.company_id, value, err
                );
            }
            (None, Some(err)) => println!("  {:<8} {}: {}", status, outcome.company_id, err),
            (None, None) => println!("  {:<8} {}", status, outcome.company_id),
        }
    }
}

fn print_tsv_report(report: &ApplyReport) {
    println!("company_id\taccount_order_id\tstatus\terror");
    for outcome in &report.outcomes {
        println!(
            "{}\t{}\t{:?}\t{}",
            outcome.company_id,
            outcome.account_order_id.as_deref().unwrap_or(""),
            outcome.status,
            outcome.error.as_deref().unwrap_or("")
        );
    }
}
