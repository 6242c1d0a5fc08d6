//! `bidkit match` command - matcher-only run for one RFP

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_percent, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dataset::Dataset;
use crate::core::matcher;

#[derive(clap::Args, Debug)]
pub struct MatchArgs {
    /// RFP id to match (e.g. RFP-2026-001)
    pub rfp_id: String,
}

pub fn run(args: MatchArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = Dataset::load(&global.data).map_err(|e| miette::miette!("{}", e))?;
    let rfp = dataset
        .rfp(&args.rfp_id)
        .ok_or_else(|| miette::miette!("no RFP with id {}", args.rfp_id))?;

    let recommendations = matcher::recommend_all(&rfp.requirements, &dataset.products);

    if global.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&recommendations).into_diagnostic()?
        );
        return Ok(());
    }

    println!(
        "{} {} requirement(s) against {} product(s)",
        style("Matching").bold(),
        rfp.requirements.len(),
        dataset.products.len()
    );
    println!();

    for rec in &recommendations {
        println!(
            "{} Item {}: {}",
            style("▸").cyan(),
            rec.requirement_item_no,
            truncate_str(&rec.requirement_description, 60)
        );

        if rec.top_matches.is_empty() {
            println!("  {} no product reaches the qualifying floor", style("✗").red());
            println!();
            continue;
        }

        let mut builder = Builder::default();
        builder.push_record(["Rank", "SKU", "Product", "Match", "Missing", "Exceeded"]);
        for (rank, m) in rec.top_matches.iter().enumerate() {
            builder.push_record([
                (rank + 1).to_string(),
                m.sku.clone(),
                truncate_str(&m.product_name, 28),
                format_percent(m.match_percentage),
                m.missing_specs.join(", "),
                m.exceeded_specs.join(", "),
            ]);
        }
        println!("{}", builder.build().with(Style::sharp()));

        if let Some(sku) = &rec.selected_sku {
            println!(
                "  {} selected {} ({})",
                style("✓").green(),
                sku,
                format_percent(rec.selected_match_percentage)
            );
        }
        println!();
    }

    if !global.quiet {
        let matched = recommendations.iter().filter(|r| r.is_matched()).count();
        println!(
            "{}/{} item(s) matched",
            matched,
            recommendations.len()
        );
    }

    Ok(())
}
