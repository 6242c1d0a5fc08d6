//! `bidkit catalog` command - product catalog inspection

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, format_currency, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dataset::Dataset;
use crate::entities::product::{Product, ProductCategory};

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List catalog products
    List(ListArgs),

    /// Show one product's details
    Show(ShowArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryFilter {
    Wires,
    Cables,
    ElectricalGoods,
    All,
}

impl CategoryFilter {
    fn accepts(&self, category: ProductCategory) -> bool {
        matches!(
            (self, category),
            (CategoryFilter::All, _)
                | (CategoryFilter::Wires, ProductCategory::Wires)
                | (CategoryFilter::Cables, ProductCategory::Cables)
                | (CategoryFilter::ElectricalGoods, ProductCategory::ElectricalGoods)
        )
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryFilter,

    /// Show only available products
    #[arg(long)]
    pub available: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Product SKU (e.g. CU-11KV-001)
    pub sku: String,
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::List(args) => list(args, global),
        CatalogCommands::Show(args) => show(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = Dataset::load(&global.data).map_err(|e| miette::miette!("{}", e))?;

    let products: Vec<&Product> = dataset
        .products
        .iter()
        .filter(|p| args.category.accepts(p.category))
        .filter(|p| !args.available || p.availability)
        .collect();

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&products).into_diagnostic()?);
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let sep = if global.format == OutputFormat::Csv { "," } else { "\t" };
            println!(
                "{}",
                ["sku", "name", "category", "manufacturer", "price", "available"].join(sep)
            );
            for p in &products {
                let fields = [
                    escape_csv(&p.sku),
                    escape_csv(&p.product_name),
                    p.category.to_string(),
                    escape_csv(&p.manufacturer),
                    p.unit_price.map_or(String::new(), |v| v.to_string()),
                    p.availability.to_string(),
                ];
                println!("{}", fields.join(sep));
            }
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["SKU", "Name", "Category", "Manufacturer", "Price", "Avail"]);
            for p in &products {
                builder.push_record([
                    p.sku.clone(),
                    truncate_str(&p.product_name, 32),
                    p.category.to_string(),
                    truncate_str(&p.manufacturer, 20),
                    p.unit_price.map_or("-".to_string(), format_currency),
                    if p.availability { "yes" } else { "no" }.to_string(),
                ]);
            }
            println!("{}", builder.build().with(Style::sharp()));
            if !global.quiet {
                println!("{} product(s)", products.len());
            }
        }
    }

    Ok(())
}

fn show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let dataset = Dataset::load(&global.data).map_err(|e| miette::miette!("{}", e))?;
    let product = dataset
        .product(&args.sku)
        .ok_or_else(|| miette::miette!("no product with SKU {}", args.sku))?;

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(product).into_diagnostic()?);
        return Ok(());
    }

    println!("{}", style(&product.product_name).bold());
    println!("  SKU:          {}", product.sku);
    println!("  Category:     {}", product.category);
    println!("  Manufacturer: {}", product.manufacturer);
    if let Some(price) = product.unit_price {
        println!("  List price:   {}", format_currency(price));
    }
    println!("  Available:    {}", if product.availability { "yes" } else { "no" });
    println!();

    if !product.specifications.is_empty() {
        println!("{}", style("SPECIFICATIONS").bold());
        for (name, value) in &product.specifications {
            println!("  {}: {}", name, value);
        }
    }

    Ok(())
}
