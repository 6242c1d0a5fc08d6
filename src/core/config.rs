//! Pricing configuration - reference tables behind the cost calculator
//!
//! The configuration is assembled from two fixture files: `pricing.json`
//! (base prices, discount tiers, test service tables, logistics, margin)
//! and `test_requirements.json` (certification fees, delivery multipliers).
//! Raw file structs keep every section optional; [`PricingConfig::from_files`]
//! validates them and names the offending section when a required one is
//! missing. Optional sections fall back to the documented defaults.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Pricing configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pricing configuration is missing required section `{0}`")]
    MissingSection(&'static str),

    #[error("invalid quantity range `{0}` (expected \"N+\" or \"A-B\")")]
    InvalidRange(String),
}

/// A quantity range key for a discount tier: `"N+"` or `"A-B"` (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum QuantityRange {
    AtLeast(u32),
    Between(u32, u32),
}

impl QuantityRange {
    pub fn contains(&self, quantity: u32) -> bool {
        match self {
            QuantityRange::AtLeast(min) => quantity >= *min,
            QuantityRange::Between(min, max) => (*min..=*max).contains(&quantity),
        }
    }
}

impl std::str::FromStr for QuantityRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::InvalidRange(s.to_string());

        if let Some(min) = s.strip_suffix('+') {
            return min.parse().map(QuantityRange::AtLeast).map_err(|_| bad());
        }
        if let Some((min, max)) = s.split_once('-') {
            let min: u32 = min.parse().map_err(|_| bad())?;
            let max: u32 = max.parse().map_err(|_| bad())?;
            return Ok(QuantityRange::Between(min, max));
        }
        Err(bad())
    }
}

impl TryFrom<String> for QuantityRange {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for QuantityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityRange::AtLeast(min) => write!(f, "{}+", min),
            QuantityRange::Between(min, max) => write!(f, "{}-{}", min, max),
        }
    }
}

/// One quantity-discount tier; first matching tier in declared order wins
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountTier {
    pub range: QuantityRange,
    pub rate: f64,
}

/// Cost model for one test service
///
/// Sample count comes from `samples_per_1000m` (routine tests, scaled by
/// quantity), `samples_required` (type tests, fixed), or defaults to 1.
#[derive(Debug, Clone, Deserialize)]
pub struct TestService {
    pub cost_per_sample: f64,

    #[serde(default)]
    pub samples_per_1000m: Option<f64>,

    #[serde(default)]
    pub samples_required: Option<u32>,
}

/// The routine/type/specialized test cost tables
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestingServices {
    #[serde(default)]
    pub routine_tests: BTreeMap<String, TestService>,

    #[serde(default)]
    pub type_tests: BTreeMap<String, TestService>,

    #[serde(default)]
    pub specialized_tests: BTreeMap<String, TestService>,
}

impl TestingServices {
    /// Merge the three tables; later tables override earlier keys
    pub fn merged(&self) -> BTreeMap<&str, &TestService> {
        let mut catalog: BTreeMap<&str, &TestService> = BTreeMap::new();
        for table in [&self.routine_tests, &self.type_tests, &self.specialized_tests] {
            for (name, service) in table {
                catalog.insert(name.as_str(), service);
            }
        }
        catalog
    }
}

/// Fee for one certification catalog entry
#[derive(Debug, Clone, Deserialize)]
pub struct CertificationFee {
    pub cost: f64,
}

/// Validated pricing configuration, read-only for the whole run
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Base unit price per SKU
    pub base_prices: BTreeMap<String, f64>,

    /// Quantity discount tiers, in declaration order
    pub quantity_discounts: Vec<DiscountTier>,

    /// Test cost tables
    pub testing: TestingServices,

    /// Certification fee table, keyed by snake_case certification name
    pub certifications: BTreeMap<String, CertificationFee>,

    /// Base transport cost
    pub transportation_base: f64,

    /// Multiplier when delivery is due within 20 days
    pub express_multiplier: f64,

    /// Multiplier when delivery is due within 30 days
    pub expedited_multiplier: f64,

    /// Margin rate on total material cost
    pub margin_rate: f64,
}

impl PricingConfig {
    /// Validate the raw fixture files into a usable configuration
    ///
    /// Required sections: `material_pricing` with both `base_prices` and
    /// `quantity_discounts`, and `testing_services`. Everything else has a
    /// default.
    pub fn from_files(
        pricing: RawPricingFile,
        tests: RawTestRequirementsFile,
    ) -> Result<Self, ConfigError> {
        let material = pricing
            .material_pricing
            .ok_or(ConfigError::MissingSection("material_pricing"))?;
        let base_prices = material
            .base_prices
            .ok_or(ConfigError::MissingSection("material_pricing.base_prices"))?;
        let quantity_discounts = material.quantity_discounts.ok_or(
            ConfigError::MissingSection("material_pricing.quantity_discounts"),
        )?;
        let testing = pricing
            .testing_services
            .ok_or(ConfigError::MissingSection("testing_services"))?;

        let delivery = tests.delivery_requirements.unwrap_or_default();

        Ok(PricingConfig {
            base_prices,
            quantity_discounts,
            testing,
            certifications: tests.certification_requirements.unwrap_or_default(),
            transportation_base: pricing
                .logistics_costs
                .map_or_else(default_transportation_base, |l| l.transportation_base),
            express_multiplier: delivery.express_delivery.cost_multiplier,
            expedited_multiplier: delivery.expedited_delivery.cost_multiplier,
            margin_rate: pricing
                .margin_settings
                .map_or_else(default_margin_rate, |m| m.government_tender_margin),
        })
    }
}

/// `pricing.json` as it sits on disk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPricingFile {
    #[serde(default)]
    pub material_pricing: Option<RawMaterialPricing>,

    #[serde(default)]
    pub testing_services: Option<TestingServices>,

    #[serde(default)]
    pub logistics_costs: Option<LogisticsCosts>,

    #[serde(default)]
    pub margin_settings: Option<MarginSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMaterialPricing {
    #[serde(default)]
    pub base_prices: Option<BTreeMap<String, f64>>,

    #[serde(default)]
    pub quantity_discounts: Option<Vec<DiscountTier>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticsCosts {
    #[serde(default = "default_transportation_base")]
    pub transportation_base: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarginSettings {
    #[serde(default = "default_margin_rate")]
    pub government_tender_margin: f64,
}

/// `test_requirements.json` as it sits on disk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTestRequirementsFile {
    #[serde(default)]
    pub certification_requirements: Option<BTreeMap<String, CertificationFee>>,

    #[serde(default)]
    pub delivery_requirements: Option<DeliveryRates>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryRates {
    pub express_delivery: DeliverySpeed,
    pub expedited_delivery: DeliverySpeed,
}

impl Default for DeliveryRates {
    fn default() -> Self {
        Self {
            express_delivery: DeliverySpeed {
                cost_multiplier: default_express_multiplier(),
            },
            expedited_delivery: DeliverySpeed {
                cost_multiplier: default_expedited_multiplier(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliverySpeed {
    pub cost_multiplier: f64,
}

fn default_transportation_base() -> f64 {
    2500.0
}

fn default_margin_rate() -> f64 {
    0.10
}

fn default_express_multiplier() -> f64 {
    1.25
}

fn default_expedited_multiplier() -> f64 {
    1.15
}
