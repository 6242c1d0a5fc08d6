//! `bidkit run` command - full pipeline execution and bid dashboard

use chrono::NaiveDate;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_currency, format_percent, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dataset::Dataset;
use crate::core::pipeline::{self, PipelineError};
use crate::core::selector::DEFAULT_MAX_DAYS;
use crate::entities::response::FinalRecommendation;

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Reference date for deadline filtering (default: today)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Bid window in days
    #[arg(long, default_value_t = DEFAULT_MAX_DAYS)]
    pub max_days: i64,

    /// Write the final recommendation JSON to a file
    #[arg(long, short = 'o')]
    pub save: Option<PathBuf>,

    /// Write the pricing breakdown as CSV to a file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = Dataset::load(&global.data).map_err(|e| miette::miette!("{}", e))?;
    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let doc = match pipeline::run(
        &dataset.rfps,
        &dataset.products,
        &dataset.pricing,
        &dataset.test_requirements,
        today,
        args.max_days,
    ) {
        Ok(doc) => doc,
        Err(err) => return Err(report_failure(err, global)),
    };

    if let Some(path) = &args.save {
        let json = serde_json::to_string_pretty(&doc).into_diagnostic()?;
        fs::write(path, json).into_diagnostic()?;
        if !global.quiet {
            println!("{} Saved response to {}", style("✓").green(), path.display());
        }
    }

    if let Some(path) = &args.export_csv {
        export_breakdown_csv(&doc, path)?;
        if !global.quiet {
            println!("{} Exported breakdown to {}", style("✓").green(), path.display());
        }
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&doc).into_diagnostic()?
            );
        }
        _ => print_dashboard(&doc, global),
    }

    Ok(())
}

/// Turn a pipeline failure into a diagnostic, surfacing partial state
fn report_failure(err: PipelineError, global: &GlobalOpts) -> miette::Report {
    if !global.quiet {
        match &err {
            PipelineError::Selection { considered, .. } => {
                eprintln!(
                    "{} {} candidate(s) considered, none inside the bid window",
                    style("✗").red(),
                    considered
                );
            }
            PipelineError::Matching { rfp, .. } => {
                eprintln!(
                    "{} selected {} but matching could not run",
                    style("✗").red(),
                    rfp.rfp_id
                );
            }
            PipelineError::Pricing {
                rfp,
                recommendations,
                ..
            } => {
                eprintln!(
                    "{} selected {} and matched {} item(s) before pricing failed",
                    style("✗").red(),
                    rfp.rfp_id,
                    recommendations.iter().filter(|r| r.is_matched()).count()
                );
            }
        }
    }
    miette::miette!("{}", err)
}

fn print_dashboard(doc: &FinalRecommendation, global: &GlobalOpts) {
    let width = 68;

    println!("{}", style("RFP Response").bold().underlined());
    println!("{}", "═".repeat(width));
    println!();

    println!("{}", style("RFP OVERVIEW").bold());
    println!("  ID:           {}", doc.rfp.rfp_id);
    println!("  Title:        {}", doc.rfp.title);
    println!("  Organization: {}", doc.rfp.organization);
    println!("  Deadline:     {}", doc.rfp.submission_deadline);
    if let Some(value) = doc.rfp.project_value {
        println!("  Project value: {}", format_currency(value));
    }
    println!();

    let tech = &doc.technical.summary;
    println!("{}", style("TECHNICAL PROPOSAL").bold());
    println!("  Items analyzed: {}", tech.total_items);
    println!(
        "  Matched:        {} ({})",
        tech.items_matched,
        format_percent(tech.match_success_rate)
    );
    println!("  Average match:  {}", format_percent(tech.average_spec_match));
    for rec in &doc.technical.recommendations {
        match &rec.selected_sku {
            Some(sku) => println!(
                "  {} Item {}: {} ({})",
                style("✓").green(),
                rec.requirement_item_no,
                sku,
                format_percent(rec.selected_match_percentage)
            ),
            None => println!(
                "  {} Item {}: no suitable product",
                style("✗").red(),
                rec.requirement_item_no
            ),
        }
    }
    println!();

    let cost = &doc.commercial.summary;
    println!("{}", style("COMMERCIAL PROPOSAL").bold());
    println!("  Material cost:      {}", format_currency(cost.total_material_cost));
    println!("  Testing cost:       {}", format_currency(cost.total_testing_cost));
    println!("  Certification cost: {}", format_currency(cost.certification_cost));
    println!("  Delivery cost:      {}", format_currency(cost.delivery_cost));
    println!(
        "  Margin ({}):     {}",
        format_percent(cost.margin_rate * 100.0),
        format_currency(cost.margin_amount)
    );
    println!(
        "  {} {}",
        style("Grand total:").bold(),
        style(format_currency(cost.grand_total)).bold()
    );
    println!();

    if !doc.commercial.breakdown.is_empty() {
        println!("{}", style("PRICING BREAKDOWN").bold());
        let mut builder = Builder::default();
        builder.push_record(["Item", "SKU", "Qty", "Unit price", "Material", "Testing", "Total"]);
        for item in &doc.commercial.breakdown {
            builder.push_record([
                item.item_no.clone(),
                truncate_str(&item.sku, 16),
                item.quantity.to_string(),
                format_currency(item.unit_price),
                format_currency(item.total_material_cost),
                format_currency(item.total_testing_cost),
                format_currency(item.total_cost),
            ]);
        }
        println!("{}", builder.build().with(Style::sharp()));
        println!();
    }

    if !doc.commercial.data_gaps.is_empty() && !global.quiet {
        println!("{}", style("DATA GAPS").bold().yellow());
        for gap in &doc.commercial.data_gaps {
            println!("  {} {}", style("!").yellow(), gap);
        }
        println!();
    }

    println!("{}", style("COMPLIANCE").bold());
    println!("  Delivery window: {} days", doc.compliance.delivery_days);
    println!(
        "  Tests covered:   {}",
        doc.compliance.testing_requirements_covered.join(", ")
    );
    println!();

    if !global.quiet {
        println!(
            "{} Total bid amount: {}",
            style("➤").cyan(),
            style(format_currency(cost.grand_total)).bold()
        );
    }
}

/// Write the per-item pricing breakdown as a CSV file
fn export_breakdown_csv(doc: &FinalRecommendation, path: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).into_diagnostic()?;
    writer
        .write_record([
            "item_no",
            "sku",
            "quantity",
            "base_unit_price",
            "discount_rate",
            "unit_price",
            "material_cost",
            "testing_cost",
            "allocated_overhead",
            "total_cost",
        ])
        .into_diagnostic()?;

    for item in &doc.commercial.breakdown {
        writer
            .write_record([
                item.item_no.clone(),
                item.sku.clone(),
                item.quantity.to_string(),
                item.base_unit_price.to_string(),
                item.discount_rate.to_string(),
                item.unit_price.to_string(),
                item.total_material_cost.to_string(),
                item.total_testing_cost.to_string(),
                item.allocated_overhead.to_string(),
                item.total_cost.to_string(),
            ])
            .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}
