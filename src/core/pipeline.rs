//! Pipeline orchestration - selector, matcher, calculator, consolidator
//!
//! The four stages compose sequentially; each consumes only the previous
//! stage's output plus static reference data. Failures are typed and carry
//! whatever partial results existed before the failing stage, so callers
//! can decide to retry, widen the window, or present partial results.

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::config::{ConfigError, PricingConfig, RawPricingFile, RawTestRequirementsFile};
use crate::core::{consolidator, costing, matcher, selector};
use crate::entities::product::Product;
use crate::entities::recommendation::ProductRecommendation;
use crate::entities::response::FinalRecommendation;
use crate::entities::rfp::Rfp;

/// A stage failure that halts the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No candidate RFP satisfies the deadline window
    #[error("no suitable RFP found: {reason}")]
    Selection {
        reason: String,
        /// How many candidates were considered before filtering
        considered: usize,
    },

    /// Matching cannot run at all (empty catalog); per-item zero-match is
    /// not an error and is reported in the final document instead
    #[error("matching failed: {reason}")]
    Matching { reason: String, rfp: Box<Rfp> },

    /// Required pricing configuration is missing or malformed
    #[error("pricing failed: {source}")]
    Pricing {
        #[source]
        source: ConfigError,
        rfp: Box<Rfp>,
        recommendations: Vec<ProductRecommendation>,
    },
}

/// Run the full pipeline over one candidate set
///
/// `today` is passed explicitly so the run is reproducible. The pricing
/// configuration is validated at the pricing stage, so a `Pricing` failure
/// still carries the selection and matching results computed before it.
pub fn run(
    candidates: &[Rfp],
    catalog: &[Product],
    pricing: &RawPricingFile,
    test_requirements: &RawTestRequirementsFile,
    today: NaiveDate,
    max_days: i64,
) -> Result<FinalRecommendation, PipelineError> {
    let rfp = selector::select(candidates, today, max_days).ok_or_else(|| {
        PipelineError::Selection {
            reason: format!("no candidate deadline falls within {} days", max_days),
            considered: candidates.len(),
        }
    })?;

    if catalog.is_empty() {
        return Err(PipelineError::Matching {
            reason: "product catalog is empty".to_string(),
            rfp: Box::new(rfp.clone()),
        });
    }
    let recommendations = matcher::recommend_all(&rfp.requirements, catalog);

    let config = PricingConfig::from_files(pricing.clone(), test_requirements.clone()).map_err(
        |source| PipelineError::Pricing {
            source,
            rfp: Box::new(rfp.clone()),
            recommendations: recommendations.clone(),
        },
    )?;
    let report = costing::price(rfp, &recommendations, &config);

    Ok(consolidator::consolidate(rfp, recommendations, report))
}
