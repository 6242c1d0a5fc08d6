//! Pricing result types - per-item cost breakdowns and run-level totals

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cost of one required test for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCharge {
    /// Cost of testing one sample
    pub cost_per_sample: f64,

    /// Samples needed for this quantity
    pub samples_needed: u32,

    /// Total cost for this test
    pub total_cost: f64,
}

/// Priced breakdown for one matched line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Requirement item number
    pub item_no: String,

    /// Selected product SKU
    pub sku: String,

    /// Quantity from the requirement
    pub quantity: u32,

    /// Catalog base price before discount (0 when the SKU has no price
    /// entry - a data gap, not an error)
    pub base_unit_price: f64,

    /// Discount rate applied from the quantity tier table
    pub discount_rate: f64,

    /// Unit price after discount
    pub unit_price: f64,

    /// unit_price * quantity
    pub total_material_cost: f64,

    /// Per-test charges, keyed by test name
    pub testing_costs: BTreeMap<String, TestCharge>,

    /// Sum of all test charges for this item
    pub total_testing_cost: f64,

    /// This item's proportional share of certification + delivery + margin
    pub allocated_overhead: f64,

    /// Material + testing + allocated overhead
    pub total_cost: f64,
}

/// Run-level additional costs, computed once per response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalCosts {
    /// Certification fees matched from the acceptance criteria
    pub certification: f64,

    /// Transport base cost times the delivery-speed multiplier
    pub delivery: f64,

    /// Margin on total material cost
    pub margin: f64,

    /// Margin rate applied
    pub margin_rate: f64,

    /// Delivery window parsed from the acceptance criteria
    pub delivery_days: u32,
}

impl AdditionalCosts {
    /// Total to allocate across items
    pub fn total(&self) -> f64 {
        self.certification + self.delivery + self.margin
    }
}

/// Complete pricing output for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReport {
    /// Per-item breakdowns, one per matched requirement
    pub items: Vec<PricingBreakdown>,

    /// Run-level additional costs before allocation
    pub additional: AdditionalCosts,

    /// Sum of material costs across items
    pub total_material_cost: f64,

    /// Sum of testing costs across items
    pub total_testing_cost: f64,

    /// Sum of item total costs (materials + testing + overhead)
    pub grand_total: f64,

    /// Reference-data gaps absorbed as zero cost (missing SKU price,
    /// unknown test name, unmatched certification key)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_gaps: Vec<String>,
}
