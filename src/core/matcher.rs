//! Specification matching - scoring catalog products against requirements
//!
//! Every (requirement, product) pair is scored independently. A spec is
//! satisfied by type-specific rules: numeric values match within a 5%
//! relative tolerance, text values match on case-insensitive substring in
//! either direction, and mixed types fall back to case-insensitive equality
//! of the rendered values. Products below the 30% floor are discarded.

use std::collections::BTreeMap;

use crate::entities::product::Product;
use crate::entities::recommendation::{ProductRecommendation, SpecComparison, SpecMatch};
use crate::entities::rfp::{Requirement, SpecValue};

/// Minimum match percentage for a product to qualify as a candidate
pub const MATCH_FLOOR: f64 = 30.0;

/// Relative tolerance for numeric spec comparison
pub const NUMERIC_TOLERANCE: f64 = 0.05;

/// Numeric specs above requirement * EXCEED_FACTOR are flagged as exceeded
pub const EXCEED_FACTOR: f64 = 1.1;

/// Number of candidates retained per requirement
const TOP_MATCH_COUNT: usize = 3;

/// Whether a single product spec satisfies the required value
pub fn spec_satisfied(required: &SpecValue, actual: &SpecValue) -> bool {
    match (required, actual) {
        (SpecValue::Number(r), SpecValue::Number(a)) => (a - r).abs() <= NUMERIC_TOLERANCE * r.abs(),
        (SpecValue::Text(r), SpecValue::Text(a)) => {
            let r = r.to_lowercase();
            let a = a.to_lowercase();
            r.contains(&a) || a.contains(&r)
        }
        _ => required.to_string().to_lowercase() == actual.to_string().to_lowercase(),
    }
}

/// Percentage of requirement specs the product satisfies
///
/// An empty requirement spec map scores 0: there is nothing to claim a
/// match against.
pub fn match_percentage(
    required: &BTreeMap<String, SpecValue>,
    product: &BTreeMap<String, SpecValue>,
) -> f64 {
    if required.is_empty() {
        return 0.0;
    }

    let matched = required
        .iter()
        .filter(|(name, value)| {
            product
                .get(name.as_str())
                .is_some_and(|actual| spec_satisfied(value, actual))
        })
        .count();

    matched as f64 / required.len() as f64 * 100.0
}

/// Score one product against one requirement
///
/// Returns `None` when the product does not reach [`MATCH_FLOOR`]. For
/// qualifying products the comparison detail is derived: matched pairs
/// (every spec present on both sides, satisfied or not), missing spec
/// names, and numeric specs the product exceeds by more than 10%.
pub fn evaluate(requirement: &Requirement, product: &Product) -> Option<SpecMatch> {
    let percentage = match_percentage(&requirement.technical_specs, &product.specifications);
    if percentage < MATCH_FLOOR {
        return None;
    }

    let mut matched_specs = BTreeMap::new();
    let mut missing_specs = Vec::new();
    let mut exceeded_specs = Vec::new();

    for (name, required_value) in &requirement.technical_specs {
        match product.specifications.get(name) {
            Some(actual) => {
                matched_specs.insert(
                    name.clone(),
                    SpecComparison {
                        required: required_value.clone(),
                        actual: actual.clone(),
                    },
                );

                if let (Some(r), Some(a)) = (required_value.as_number(), actual.as_number()) {
                    if a > r * EXCEED_FACTOR {
                        exceeded_specs.push(format!("{}: {} > {}", name, actual, required_value));
                    }
                }
            }
            None => missing_specs.push(name.clone()),
        }
    }

    Some(SpecMatch {
        sku: product.sku.clone(),
        product_name: product.product_name.clone(),
        match_percentage: percentage,
        matched_specs,
        missing_specs,
        exceeded_specs,
    })
}

/// Find the best catalog products for one requirement
///
/// Qualifying candidates are sorted by descending match percentage (ties
/// keep catalog order), the top three are retained, and the first becomes
/// the selection. A requirement with no qualifying candidate yields a
/// recommendation with no selection - reported, never fatal.
pub fn recommend(requirement: &Requirement, catalog: &[Product]) -> ProductRecommendation {
    let mut matches: Vec<SpecMatch> = catalog
        .iter()
        .filter_map(|product| evaluate(requirement, product))
        .collect();

    // stable sort preserves catalog order among equal percentages
    matches.sort_by(|a, b| {
        b.match_percentage
            .partial_cmp(&a.match_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(TOP_MATCH_COUNT);

    let selected_sku = matches.first().map(|m| m.sku.clone());
    let selected_match_percentage = matches.first().map_or(0.0, |m| m.match_percentage);

    ProductRecommendation {
        requirement_item_no: requirement.item_no.clone(),
        requirement_description: requirement.description.clone(),
        top_matches: matches,
        selected_sku,
        selected_match_percentage,
    }
}

/// Run the matcher over every requirement of an RFP
pub fn recommend_all(requirements: &[Requirement], catalog: &[Product]) -> Vec<ProductRecommendation> {
    requirements
        .iter()
        .map(|req| recommend(req, catalog))
        .collect()
}
