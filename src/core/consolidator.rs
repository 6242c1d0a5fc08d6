//! Response consolidation - merging stage outputs into the bid document
//!
//! Pure aggregation: no new business logic and no I/O. Summary statistics
//! are derived here; the document is handed back to the caller as a value.

use crate::core::costing;
use crate::entities::pricing::CostReport;
use crate::entities::recommendation::ProductRecommendation;
use crate::entities::response::{
    CommercialProposal, ComplianceSummary, CostSummary, FinalRecommendation, RfpInformation,
    TechnicalProposal, TechnicalSummary,
};
use crate::entities::rfp::Rfp;

/// Build the final bid document from the three stage outputs
pub fn consolidate(
    rfp: &Rfp,
    recommendations: Vec<ProductRecommendation>,
    report: CostReport,
) -> FinalRecommendation {
    let total_items = rfp.requirements.len();
    let matched: Vec<&ProductRecommendation> =
        recommendations.iter().filter(|r| r.is_matched()).collect();
    let items_matched = matched.len();

    let match_success_rate = if total_items > 0 {
        items_matched as f64 / total_items as f64 * 100.0
    } else {
        0.0
    };
    let average_spec_match = if items_matched > 0 {
        matched
            .iter()
            .map(|r| r.selected_match_percentage)
            .sum::<f64>()
            / items_matched as f64
    } else {
        0.0
    };

    FinalRecommendation {
        rfp: RfpInformation {
            rfp_id: rfp.rfp_id.clone(),
            title: rfp.title.clone(),
            organization: rfp.organization.clone(),
            submission_deadline: rfp.submission_deadline,
            project_value: rfp.project_value,
        },
        technical: TechnicalProposal {
            summary: TechnicalSummary {
                total_items,
                items_matched,
                match_success_rate,
                average_spec_match,
            },
            recommendations,
        },
        compliance: ComplianceSummary {
            testing_requirements_covered: rfp.testing_requirements.clone(),
            acceptance_criteria_addressed: rfp.acceptance_criteria.clone(),
            delivery_days: costing::parse_delivery_days(&rfp.acceptance_criteria),
        },
        commercial: CommercialProposal {
            summary: CostSummary {
                total_material_cost: report.total_material_cost,
                total_testing_cost: report.total_testing_cost,
                certification_cost: report.additional.certification,
                delivery_cost: report.additional.delivery,
                margin_amount: report.additional.margin,
                margin_rate: report.additional.margin_rate,
                grand_total: report.grand_total,
                currency: "INR".to_string(),
            },
            breakdown: report.items,
            data_gaps: report.data_gaps,
        },
    }
}
