//! Matching result types - per-product spec matches and per-item recommendations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::rfp::SpecValue;

/// Required vs actual value for a spec present on both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecComparison {
    pub required: SpecValue,
    pub actual: SpecValue,
}

/// Result of comparing one requirement's specs against one product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecMatch {
    /// Candidate product SKU
    pub sku: String,

    /// Candidate product name
    pub product_name: String,

    /// Fraction of requirement specs satisfied, out of 100
    pub match_percentage: f64,

    /// Specs present on both sides, with required and actual values
    pub matched_specs: BTreeMap<String, SpecComparison>,

    /// Required spec names the product does not carry
    pub missing_specs: Vec<String>,

    /// Numeric specs where the product exceeds the requirement by more
    /// than 10%, formatted for display ("voltage: 33 > 11")
    pub exceeded_specs: Vec<String>,
}

/// Per-requirement matching outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecommendation {
    /// Item number of the requirement this recommendation answers
    pub requirement_item_no: String,

    /// Requirement description, carried for display
    pub requirement_description: String,

    /// Top candidates by descending match percentage, at most three
    pub top_matches: Vec<SpecMatch>,

    /// Best match, or `None` if no candidate reached the qualifying floor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_sku: Option<String>,

    /// Match percentage of the selected product (0 when unmatched)
    pub selected_match_percentage: f64,
}

impl ProductRecommendation {
    /// Whether a product was selected for this requirement
    pub fn is_matched(&self) -> bool {
        self.selected_sku.is_some()
    }
}
