//! Entity type definitions
//!
//! Bidkit works with the following entity families:
//!
//! **Inputs (read-only reference data):**
//! - [`Rfp`] / [`Requirement`] - candidate tenders and their line items
//! - [`Product`] - catalog products with specification maps
//!
//! **Stage outputs:**
//! - [`SpecMatch`] / [`ProductRecommendation`] - matcher results
//! - [`PricingBreakdown`] / [`CostReport`] - cost calculator results
//! - [`FinalRecommendation`] - the consolidated bid document

pub mod pricing;
pub mod product;
pub mod recommendation;
pub mod response;
pub mod rfp;

pub use pricing::{AdditionalCosts, CostReport, PricingBreakdown, TestCharge};
pub use product::{Product, ProductCategory};
pub use recommendation::{ProductRecommendation, SpecComparison, SpecMatch};
pub use response::FinalRecommendation;
pub use rfp::{Requirement, Rfp, RfpStatus, SpecValue};
