use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::engine::reconcile;
use crate::matching::report::ReconReport;
use crate::parsing::json;

#[derive(Args)]
pub struct MatchArgs {
    /// JSON file with the ERP customer export
    #[arg(long)]
    pub customers: PathBuf,

    /// JSON file with the CRM company export
    #[arg(long)]
    pub companies: PathBuf,

    /// Also write the full JSON report to this file (input for `apply`)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Execute the match subcommand
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or a record is missing
/// its id.
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let customers = json::load_customers(&args.customers)?;
    let companies = json::load_companies(&args.companies)?;

    if verbose {
        eprintln!(
            "Loaded {} customers and {} companies",
            customers.len(),
            companies.len()
        );
    }

    let report = reconcile(&customers, &companies)?;

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    if let Some(path) = &args.output {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        eprintln!("Wrote report to {}", path.display());
    }

    Ok(())
}

fn print_text_report(report: &ReconReport) {
    let s = &report.summary;
    println!(
        "Matched {} of {} customers against {} companies",
        s.matched, s.total_customers, s.total_companies
    );
    println!(
        "  by strategy: {} account_number, {} account_order_id, {} name_address",
        s.by_strategy.account_number, s.by_strategy.account_order_id, s.by_strategy.name_address
    );

    if !report.matches.is_empty() {
        println!("\nMatches:");
        for m in &report.matches {
            println!(
                "  {:<6} {:<16} {} {} -> {} {} [{}]",
                m.confidence.to_string(),
                m.strategy.to_string(),
                m.customer_id,
                m.customer_name,
                m.company_id,
                m.company_name,
                m.matched_identifier
            );
        }
    }

    if !report.unmatched.is_empty() {
        println!("\nUnmatched ({}):", report.unmatched.len());
        for u in &report.unmatched {
            match (&u.candidate_company_id, &u.candidate_company_name) {
                (Some(id), Some(name)) => println!(
                    "  {} {}  candidate: {} {}",
                    u.customer.id,
                    u.customer.display_name(),
                    id,
                    name
                ),
                _ => println!("  {} {}", u.customer.id, u.customer.display_name()),
            }
        }
    }

    if !s.collisions.is_empty() {
        println!("\nWarnings ({} ambiguous index keys):", s.collisions.len());
        for c in &s.collisions {
            println!(
                "  {} key '{}': kept {}, overwrote {}",
                c.field, c.key, c.kept, c.overwritten
            );
        }
    }
}

fn print_tsv_report(report: &ReconReport) {
    println!(
        "customer_id\tcustomer_name\tcompany_id\tcompany_name\tstrategy\tconfidence\tmatched_identifier"
    );
    for m in &report.matches {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            m.customer_id,
            m.customer_name,
            m.company_id,
            m.company_name,
            m.strategy,
            m.confidence,
            m.matched_identifier
        );
    }
}
