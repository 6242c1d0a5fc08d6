//! Final recommendation document - the consolidated bid deliverable

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::pricing::PricingBreakdown;
use crate::entities::recommendation::ProductRecommendation;

/// Identity of the RFP being answered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfpInformation {
    pub rfp_id: String,
    pub title: String,
    pub organization: String,
    pub submission_deadline: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_value: Option<f64>,
}

/// Headline matching statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSummary {
    /// Number of line items in the RFP
    pub total_items: usize,

    /// Items with a selected product
    pub items_matched: usize,

    /// items_matched / total_items, out of 100 (0 for an empty RFP)
    pub match_success_rate: f64,

    /// Mean selected match percentage over matched items only
    pub average_spec_match: f64,
}

/// Technical half of the proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalProposal {
    pub summary: TechnicalSummary,
    pub recommendations: Vec<ProductRecommendation>,
}

/// Cost totals for the commercial proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_material_cost: f64,
    pub total_testing_cost: f64,
    pub certification_cost: f64,
    pub delivery_cost: f64,
    pub margin_amount: f64,
    pub margin_rate: f64,
    pub grand_total: f64,
    pub currency: String,
}

/// Commercial half of the proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommercialProposal {
    pub summary: CostSummary,
    pub breakdown: Vec<PricingBreakdown>,

    /// Reference-data gaps absorbed as zero cost during pricing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_gaps: Vec<String>,
}

/// Compliance items the bid addresses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub testing_requirements_covered: Vec<String>,
    pub acceptance_criteria_addressed: Vec<String>,
    pub delivery_days: u32,
}

/// The consolidated bid document
///
/// Built once per run by the consolidator and never mutated afterward;
/// serialization to JSON is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalRecommendation {
    pub rfp: RfpInformation,
    pub technical: TechnicalProposal,
    pub commercial: CommercialProposal,
    pub compliance: ComplianceSummary,
}
