//! Product entity type - static catalog reference data

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::rfp::SpecValue;

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Wires,
    Cables,
    ElectricalGoods,
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Wires => write!(f, "wires"),
            ProductCategory::Cables => write!(f, "cables"),
            ProductCategory::ElectricalGoods => write!(f, "electrical_goods"),
        }
    }
}

/// A catalog product
///
/// Loaded once from `products.json` and treated as read-only reference data
/// for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stock keeping unit, unique (e.g. "CU-11KV-001")
    pub sku: String,

    /// Product name
    pub product_name: String,

    /// Category
    pub category: ProductCategory,

    /// Manufacturer name
    pub manufacturer: String,

    /// Specification values, keyed by spec name
    #[serde(default)]
    pub specifications: BTreeMap<String, SpecValue>,

    /// List unit price, if known (base prices live in the pricing config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,

    /// Whether the product is currently available
    #[serde(default = "default_availability")]
    pub availability: bool,
}

fn default_availability() -> bool {
    true
}
