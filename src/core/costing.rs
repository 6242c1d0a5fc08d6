//! Cost calculation - materials, testing, additional costs, allocation
//!
//! Operates on the matcher's output: items with no selected product are
//! skipped entirely (zero cost, excluded from allocation denominators).
//! Missing reference data (SKU price, test name, certification key) is a
//! data gap absorbed as zero, never an error. No rounding happens here;
//! formatting is a presentation concern.

use std::collections::BTreeMap;

use crate::core::config::{CertificationFee, DiscountTier, PricingConfig, TestService};
use crate::entities::pricing::{AdditionalCosts, CostReport, PricingBreakdown, TestCharge};
use crate::entities::recommendation::ProductRecommendation;
use crate::entities::rfp::Rfp;

/// Delivery window assumed when the acceptance criteria name none
pub const DEFAULT_DELIVERY_DAYS: u32 = 45;

/// Delivery-related terms extracted from acceptance criteria
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTerms {
    /// Days until delivery is due
    pub delivery_days: u32,

    /// Criteria that read as certification requirements
    pub certifications_required: Vec<String>,

    /// Everything else
    pub special_requirements: Vec<String>,
}

/// Parse the delivery window from free-text acceptance criteria
///
/// Heuristic preserved from the original system: the first all-digit token
/// immediately followed by a token containing "day" wins; 45 days when no
/// criterion matches. Known to misparse text like "2 working days max 30",
/// which yields 2.
pub fn parse_delivery_days(criteria: &[String]) -> u32 {
    for criterion in criteria {
        let words: Vec<&str> = criterion.split_whitespace().collect();
        for pair in words.windows(2) {
            if pair[0].chars().all(|c| c.is_ascii_digit())
                && pair[1].to_lowercase().contains("day")
            {
                if let Ok(days) = pair[0].parse() {
                    return days;
                }
            }
        }
    }
    DEFAULT_DELIVERY_DAYS
}

/// Split acceptance criteria into delivery terms
///
/// Criteria mentioning "certification" or "mark" are certification
/// requirements; the rest are special requirements.
pub fn extract_delivery_terms(criteria: &[String]) -> DeliveryTerms {
    let mut certifications_required = Vec::new();
    let mut special_requirements = Vec::new();

    for criterion in criteria {
        let lower = criterion.to_lowercase();
        if lower.contains("certification") || lower.contains("mark") {
            certifications_required.push(criterion.clone());
        } else {
            special_requirements.push(criterion.clone());
        }
    }

    DeliveryTerms {
        delivery_days: parse_delivery_days(criteria),
        certifications_required,
        special_requirements,
    }
}

/// Discount rate for a quantity: first matching tier in declared order
pub fn quantity_discount(quantity: u32, tiers: &[DiscountTier]) -> f64 {
    tiers
        .iter()
        .find(|tier| tier.range.contains(quantity))
        .map_or(0.0, |tier| tier.rate)
}

/// Samples needed for one test at one quantity
fn samples_needed(service: &TestService, quantity: u32) -> u32 {
    if let Some(rate) = service.samples_per_1000m {
        (quantity as f64 / 1000.0 * rate).floor().max(1.0) as u32
    } else if let Some(fixed) = service.samples_required {
        fixed
    } else {
        1
    }
}

/// Total certification fees for the extracted certification requirements
///
/// A catalog entry applies when its key, underscores replaced by spaces,
/// is a substring of the lower-cased requirement text.
pub fn certification_cost(
    required: &[String],
    catalog: &BTreeMap<String, CertificationFee>,
    gaps: &mut Vec<String>,
) -> f64 {
    let mut total = 0.0;
    for requirement in required {
        let text = requirement.to_lowercase();
        let mut matched = false;
        for (key, fee) in catalog {
            if text.contains(&key.replace('_', " ")) {
                total += fee.cost;
                matched = true;
            }
        }
        if !matched {
            gaps.push(format!("no certification fee entry matches \"{}\"", requirement));
        }
    }
    total
}

/// Delivery cost multiplier for the parsed delivery window
pub fn delivery_multiplier(delivery_days: u32, config: &PricingConfig) -> f64 {
    if delivery_days <= 20 {
        config.express_multiplier
    } else if delivery_days <= 30 {
        config.expedited_multiplier
    } else {
        1.0
    }
}

/// Price the matched items of an RFP
///
/// Produces per-item breakdowns (material + testing), the run-level
/// additional costs, and the proportional allocation of those additional
/// costs by material-cost share.
pub fn price(
    rfp: &Rfp,
    recommendations: &[ProductRecommendation],
    config: &PricingConfig,
) -> CostReport {
    let mut gaps = Vec::new();

    let quantity_by_item: BTreeMap<&str, u32> = rfp
        .requirements
        .iter()
        .map(|req| (req.item_no.as_str(), req.quantity))
        .collect();

    let test_catalog = config.testing.merged();

    // material + testing per matched item
    let mut items = Vec::new();
    for rec in recommendations {
        let Some(sku) = rec.selected_sku.as_deref() else {
            continue;
        };
        let quantity = quantity_by_item
            .get(rec.requirement_item_no.as_str())
            .copied()
            .unwrap_or(0);

        let base_unit_price = match config.base_prices.get(sku) {
            Some(price) => *price,
            None => {
                gaps.push(format!("no base price for SKU {}", sku));
                0.0
            }
        };
        let discount_rate = quantity_discount(quantity, &config.quantity_discounts);
        let unit_price = base_unit_price * (1.0 - discount_rate);
        let total_material_cost = unit_price * quantity as f64;

        let mut testing_costs = BTreeMap::new();
        let mut total_testing_cost = 0.0;
        for test_name in &rfp.testing_requirements {
            let Some(service) = test_catalog.get(test_name.as_str()) else {
                continue; // not in the cost catalog; reported once below
            };
            let samples = samples_needed(service, quantity);
            let total_cost = service.cost_per_sample * samples as f64;
            total_testing_cost += total_cost;
            testing_costs.insert(
                test_name.clone(),
                TestCharge {
                    cost_per_sample: service.cost_per_sample,
                    samples_needed: samples,
                    total_cost,
                },
            );
        }

        items.push(PricingBreakdown {
            item_no: rec.requirement_item_no.clone(),
            sku: sku.to_string(),
            quantity,
            base_unit_price,
            discount_rate,
            unit_price,
            total_material_cost,
            testing_costs,
            total_testing_cost,
            allocated_overhead: 0.0,
            total_cost: total_material_cost + total_testing_cost,
        });
    }

    for test_name in &rfp.testing_requirements {
        if !test_catalog.contains_key(test_name.as_str()) {
            gaps.push(format!("test \"{}\" is not in the cost catalog", test_name));
        }
    }

    // additional costs, once per response
    let terms = extract_delivery_terms(&rfp.acceptance_criteria);
    let total_material_cost: f64 = items.iter().map(|i| i.total_material_cost).sum();
    let additional = AdditionalCosts {
        certification: certification_cost(
            &terms.certifications_required,
            &config.certifications,
            &mut gaps,
        ),
        delivery: config.transportation_base * delivery_multiplier(terms.delivery_days, config),
        margin: total_material_cost * config.margin_rate,
        margin_rate: config.margin_rate,
        delivery_days: terms.delivery_days,
    };

    // proportional allocation by material-cost share; a zero denominator
    // allocates nothing rather than dividing by zero
    for item in &mut items {
        let proportion = if total_material_cost > 0.0 {
            item.total_material_cost / total_material_cost
        } else {
            0.0
        };
        item.allocated_overhead = additional.total() * proportion;
        item.total_cost = item.total_material_cost + item.total_testing_cost + item.allocated_overhead;
    }

    let total_testing_cost = items.iter().map(|i| i.total_testing_cost).sum();
    let grand_total = items.iter().map(|i| i.total_cost).sum();

    CostReport {
        items,
        additional,
        total_material_cost,
        total_testing_cost,
        grand_total,
        data_gaps: gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{RawPricingFile, RawTestRequirementsFile};
    use crate::entities::rfp::Requirement;
    use std::collections::BTreeMap as Map;

    fn config_from(pricing: &str, tests: &str) -> PricingConfig {
        let pricing: RawPricingFile = serde_json::from_str(pricing).unwrap();
        let tests: RawTestRequirementsFile = serde_json::from_str(tests).unwrap();
        PricingConfig::from_files(pricing, tests).unwrap()
    }

    fn base_config() -> PricingConfig {
        config_from(
            r#"{
                "material_pricing": {
                    "base_prices": {"CU-11KV-001": 100.0, "AL-LV-009": 40.0},
                    "quantity_discounts": [
                        {"range": "1000-9999", "rate": 0.05},
                        {"range": "10000+", "rate": 0.08}
                    ]
                },
                "testing_services": {
                    "routine_tests": {
                        "high_voltage_test": {"cost_per_sample": 1500.0, "samples_per_1000m": 2}
                    },
                    "type_tests": {
                        "impulse_test": {"cost_per_sample": 12000.0, "samples_required": 3}
                    }
                },
                "logistics_costs": {"transportation_base": 2500.0},
                "margin_settings": {"government_tender_margin": 0.10}
            }"#,
            r#"{
                "certification_requirements": {
                    "bis_certification": {"cost": 15000.0}
                },
                "delivery_requirements": {
                    "express_delivery": {"cost_multiplier": 1.25},
                    "expedited_delivery": {"cost_multiplier": 1.15}
                }
            }"#,
        )
    }

    fn rfp_with(requirements: Vec<Requirement>, tests: Vec<&str>, criteria: Vec<&str>) -> Rfp {
        Rfp {
            rfp_id: "RFP-T".to_string(),
            title: "Test".to_string(),
            organization: "Test Org".to_string(),
            submission_deadline: "2026-10-01".parse().unwrap(),
            project_value: None,
            requirements,
            testing_requirements: tests.into_iter().map(String::from).collect(),
            acceptance_criteria: criteria.into_iter().map(String::from).collect(),
            status: Default::default(),
            source_url: None,
        }
    }

    fn requirement(item_no: &str, quantity: u32) -> Requirement {
        Requirement {
            item_no: item_no.to_string(),
            description: "cable".to_string(),
            quantity,
            unit: "meters".to_string(),
            technical_specs: Map::new(),
        }
    }

    fn matched(item_no: &str, sku: &str) -> ProductRecommendation {
        ProductRecommendation {
            requirement_item_no: item_no.to_string(),
            requirement_description: "cable".to_string(),
            top_matches: Vec::new(),
            selected_sku: Some(sku.to_string()),
            selected_match_percentage: 100.0,
        }
    }

    fn unmatched(item_no: &str) -> ProductRecommendation {
        ProductRecommendation {
            requirement_item_no: item_no.to_string(),
            requirement_description: "cable".to_string(),
            top_matches: Vec::new(),
            selected_sku: None,
            selected_match_percentage: 0.0,
        }
    }

    #[test]
    fn test_parse_delivery_days() {
        let criteria = vec!["Full delivery within 30 days of award".to_string()];
        assert_eq!(parse_delivery_days(&criteria), 30);

        let none = vec!["ISI mark required".to_string()];
        assert_eq!(parse_delivery_days(&none), DEFAULT_DELIVERY_DAYS);

        // first matching criterion wins
        let several = vec![
            "Delivery in 20 days".to_string(),
            "Penalty after 60 days".to_string(),
        ];
        assert_eq!(parse_delivery_days(&several), 20);

        // digit token not followed by a day token is ignored
        let unrelated = vec!["Supply 5000 meters within 25 days".to_string()];
        assert_eq!(parse_delivery_days(&unrelated), 25);
    }

    #[test]
    fn test_extract_delivery_terms_buckets() {
        let criteria = vec![
            "BIS certification required".to_string(),
            "ISI mark on every drum".to_string(),
            "Delivery within 30 days".to_string(),
        ];
        let terms = extract_delivery_terms(&criteria);
        assert_eq!(terms.certifications_required.len(), 2);
        assert_eq!(terms.special_requirements, vec!["Delivery within 30 days".to_string()]);
        assert_eq!(terms.delivery_days, 30);
    }

    #[test]
    fn test_quantity_discount_declaration_order() {
        let config = base_config();
        assert_eq!(quantity_discount(500, &config.quantity_discounts), 0.0);
        assert_eq!(quantity_discount(5000, &config.quantity_discounts), 0.05);
        assert_eq!(quantity_discount(10000, &config.quantity_discounts), 0.08);
    }

    #[test]
    fn test_discount_monotonic_over_ascending_tiers() {
        let config = base_config();
        let mut last = 0.0;
        for quantity in [1, 999, 1000, 9999, 10000, 50000] {
            let rate = quantity_discount(quantity, &config.quantity_discounts);
            assert!(rate >= last, "rate dropped at quantity {}", quantity);
            last = rate;
        }
    }

    #[test]
    fn test_scenario_b_material_cost() {
        // quantity 5000 in the 1000-9999 tier at 5%: unit 95, total 475000
        let config = base_config();
        let rfp = rfp_with(vec![requirement("1", 5000)], vec![], vec![]);
        let report = price(&rfp, &[matched("1", "CU-11KV-001")], &config);

        let item = &report.items[0];
        assert!((item.unit_price - 95.0).abs() < 1e-9);
        assert!((item.total_material_cost - 475_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_testing_costs_sample_rules() {
        let config = base_config();
        let rfp = rfp_with(
            vec![requirement("1", 5000)],
            vec!["high_voltage_test", "impulse_test", "unknown_test"],
            vec![],
        );
        let report = price(&rfp, &[matched("1", "CU-11KV-001")], &config);

        let item = &report.items[0];
        // routine: floor(5000/1000 * 2) = 10 samples at 1500
        assert_eq!(item.testing_costs["high_voltage_test"].samples_needed, 10);
        assert!((item.testing_costs["high_voltage_test"].total_cost - 15_000.0).abs() < 1e-9);
        // type: fixed 3 samples at 12000
        assert_eq!(item.testing_costs["impulse_test"].samples_needed, 3);
        // unknown test skipped, reported as a gap
        assert!(!item.testing_costs.contains_key("unknown_test"));
        assert!(report.data_gaps.iter().any(|g| g.contains("unknown_test")));
        assert!((item.total_testing_cost - 51_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_routine_samples_floor_at_one() {
        let config = base_config();
        let rfp = rfp_with(vec![requirement("1", 100)], vec!["high_voltage_test"], vec![]);
        let report = price(&rfp, &[matched("1", "CU-11KV-001")], &config);
        // floor(100/1000 * 2) = 0, floored to 1
        assert_eq!(report.items[0].testing_costs["high_voltage_test"].samples_needed, 1);
    }

    #[test]
    fn test_certification_and_delivery_costs() {
        let config = base_config();
        let rfp = rfp_with(
            vec![requirement("1", 5000)],
            vec![],
            vec!["BIS certification mandatory", "Delivery within 18 days"],
        );
        let report = price(&rfp, &[matched("1", "CU-11KV-001")], &config);

        assert!((report.additional.certification - 15_000.0).abs() < 1e-9);
        // 18 days is express: 2500 * 1.25
        assert_eq!(report.additional.delivery_days, 18);
        assert!((report.additional.delivery - 3125.0).abs() < 1e-9);
    }

    #[test]
    fn test_delivery_multiplier_boundaries() {
        let config = base_config();
        assert_eq!(delivery_multiplier(20, &config), 1.25);
        assert_eq!(delivery_multiplier(21, &config), 1.15);
        assert_eq!(delivery_multiplier(30, &config), 1.15);
        assert_eq!(delivery_multiplier(31, &config), 1.0);
    }

    #[test]
    fn test_allocation_sums_to_additional_total() {
        let config = base_config();
        let rfp = rfp_with(
            vec![requirement("1", 5000), requirement("2", 12000)],
            vec![],
            vec!["BIS certification mandatory", "Delivery within 30 days"],
        );
        let report = price(
            &rfp,
            &[matched("1", "CU-11KV-001"), matched("2", "AL-LV-009")],
            &config,
        );

        let allocated: f64 = report.items.iter().map(|i| i.allocated_overhead).sum();
        assert!((allocated - report.additional.total()).abs() < 1e-6);
        assert!((report.grand_total
            - (report.total_material_cost + report.total_testing_cost + report.additional.total()))
        .abs()
            < 1e-6);
    }

    #[test]
    fn test_zero_material_cost_allocates_nothing() {
        let config = base_config();
        let rfp = rfp_with(vec![requirement("1", 5000)], vec![], vec![]);
        // SKU with no base price: material cost 0, a data gap
        let report = price(&rfp, &[matched("1", "GHOST-SKU")], &config);

        assert_eq!(report.items[0].total_material_cost, 0.0);
        assert_eq!(report.items[0].allocated_overhead, 0.0);
        assert!(report.data_gaps.iter().any(|g| g.contains("GHOST-SKU")));
    }

    #[test]
    fn test_unmatched_items_are_skipped() {
        let config = base_config();
        let rfp = rfp_with(vec![requirement("1", 5000), requirement("2", 800)], vec![], vec![]);
        let report = price(&rfp, &[matched("1", "CU-11KV-001"), unmatched("2")], &config);

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].item_no, "1");
        // the matched item absorbs the full overhead
        assert!((report.items[0].allocated_overhead - report.additional.total()).abs() < 1e-6);
    }
}
