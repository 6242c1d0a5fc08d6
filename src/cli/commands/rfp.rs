//! `bidkit rfp` command - candidate RFP inspection

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, format_currency, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dataset::Dataset;
use crate::core::selector::{self, DEFAULT_MAX_DAYS};
use crate::entities::rfp::Rfp;

#[derive(Subcommand, Debug)]
pub enum RfpCommands {
    /// List candidate RFPs with selection scores
    List(ListArgs),

    /// Show one RFP's details and score breakdown
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Reference date for deadline filtering (default: today)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Bid window in days
    #[arg(long, default_value_t = DEFAULT_MAX_DAYS)]
    pub max_days: i64,

    /// Include candidates outside the bid window
    #[arg(long, short = 'a')]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// RFP id (e.g. RFP-2026-001)
    pub rfp_id: String,

    /// Reference date for score computation (default: today)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

pub fn run(cmd: RfpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RfpCommands::List(args) => list(args, global),
        RfpCommands::Show(args) => show(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = Dataset::load(&global.data).map_err(|e| miette::miette!("{}", e))?;
    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let rows: Vec<(&Rfp, i64, f64, bool)> = dataset
        .rfps
        .iter()
        .map(|rfp| {
            let days = selector::days_until(rfp.submission_deadline, today);
            let in_window = (0..=args.max_days).contains(&days);
            (rfp, days, selector::score(rfp, today).total(), in_window)
        })
        .filter(|(_, _, _, in_window)| args.all || *in_window)
        .collect();

    match global.format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = rows
                .iter()
                .map(|(rfp, days, total, in_window)| {
                    serde_json::json!({
                        "rfp_id": rfp.rfp_id,
                        "title": rfp.title,
                        "organization": rfp.organization,
                        "submission_deadline": rfp.submission_deadline,
                        "days_remaining": days,
                        "score": total,
                        "in_window": in_window,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let sep = if global.format == OutputFormat::Csv { "," } else { "\t" };
            println!(
                "{}",
                ["id", "title", "organization", "deadline", "days", "score"].join(sep)
            );
            for (rfp, days, total, _) in &rows {
                let fields = [
                    escape_csv(&rfp.rfp_id),
                    escape_csv(&rfp.title),
                    escape_csv(&rfp.organization),
                    rfp.submission_deadline.to_string(),
                    days.to_string(),
                    format!("{:.2}", total),
                ];
                println!("{}", fields.join(sep));
            }
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Title", "Organization", "Deadline", "Days", "Score"]);
            for (rfp, days, total, in_window) in &rows {
                let days_display = if *in_window {
                    days.to_string()
                } else {
                    format!("{} (out)", days)
                };
                builder.push_record([
                    rfp.rfp_id.clone(),
                    truncate_str(&rfp.title, 36),
                    truncate_str(&rfp.organization, 28),
                    rfp.submission_deadline.to_string(),
                    days_display,
                    format!("{:.2}", total),
                ]);
            }
            println!("{}", builder.build().with(Style::sharp()));
            if !global.quiet {
                println!("{} candidate(s)", rows.len());
            }
        }
    }

    Ok(())
}

fn show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = Dataset::load(&global.data).map_err(|e| miette::miette!("{}", e))?;
    let rfp = dataset
        .rfp(&args.rfp_id)
        .ok_or_else(|| miette::miette!("no RFP with id {}", args.rfp_id))?;
    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rfp).into_diagnostic()?);
        return Ok(());
    }

    println!("{}", style(&rfp.title).bold());
    println!("  ID:           {}", rfp.rfp_id);
    println!("  Organization: {}", rfp.organization);
    println!(
        "  Deadline:     {} ({} days)",
        rfp.submission_deadline,
        selector::days_until(rfp.submission_deadline, today)
    );
    if let Some(value) = rfp.project_value {
        println!("  Value:        {}", format_currency(value));
    }
    println!("  Status:       {}", rfp.status);
    println!();

    let score = selector::score(rfp, today);
    println!("{}", style("SELECTION SCORE").bold());
    println!("  Value:      {:.2}", score.value_score);
    println!("  Time:       {:.2}", score.time_score);
    println!("  Org:        {:.2}", score.org_score);
    println!("  Complexity: {:.2}", score.complexity_score);
    println!("  Total:      {:.2}", score.total());
    println!();

    println!("{}", style("REQUIREMENTS").bold());
    for req in &rfp.requirements {
        println!(
            "  {} {} - {} ({} {})",
            style("•").cyan(),
            req.item_no,
            req.description,
            req.quantity,
            req.unit
        );
        for (name, value) in &req.technical_specs {
            println!("      {}: {}", name, value);
        }
    }
    println!();

    if !rfp.testing_requirements.is_empty() {
        println!("{}", style("TESTING REQUIREMENTS").bold());
        for test in &rfp.testing_requirements {
            println!("  {} {}", style("•").cyan(), test);
        }
        println!();
    }
    if !rfp.acceptance_criteria.is_empty() {
        println!("{}", style("ACCEPTANCE CRITERIA").bold());
        for criterion in &rfp.acceptance_criteria {
            println!("  {} {}", style("•").cyan(), criterion);
        }
    }

    Ok(())
}
