//! RFP entity types - candidate tenders and their line-item requirements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// RFP lifecycle status
///
/// Tracked on the document but transitions are not enforced by the core;
/// the loader always produces `Identified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum RfpStatus {
    #[default]
    Identified,
    InProgress,
    Completed,
    Submitted,
}

impl std::fmt::Display for RfpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RfpStatus::Identified => write!(f, "identified"),
            RfpStatus::InProgress => write!(f, "in_progress"),
            RfpStatus::Completed => write!(f, "completed"),
            RfpStatus::Submitted => write!(f, "submitted"),
        }
    }
}

impl std::str::FromStr for RfpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identified" => Ok(RfpStatus::Identified),
            "in_progress" => Ok(RfpStatus::InProgress),
            "completed" => Ok(RfpStatus::Completed),
            "submitted" => Ok(RfpStatus::Submitted),
            _ => Err(format!("Unknown RFP status: {}", s)),
        }
    }
}

/// A single specification value - numeric, boolean, or free text
///
/// Fixture files carry spec values as plain JSON scalars, so this is an
/// untagged enum. Numbers always deserialize as `f64` (11 and 11.0 are the
/// same voltage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl SpecValue {
    /// Numeric value, if this spec is numeric
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpecValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // {} on f64 drops trailing zeros: 11.0 renders as "11"
            SpecValue::Number(n) => write!(f, "{}", n),
            SpecValue::Bool(b) => write!(f, "{}", b),
            SpecValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for SpecValue {
    fn from(n: f64) -> Self {
        SpecValue::Number(n)
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        SpecValue::Text(s.to_string())
    }
}

/// A line-item requirement within an RFP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// Item number, unique within the RFP (e.g. "1", "2a")
    pub item_no: String,

    /// Free-text description of the product required
    pub description: String,

    /// Quantity required
    pub quantity: u32,

    /// Unit of measure (e.g. "meters", "nos")
    pub unit: String,

    /// Required specification values, keyed by spec name
    #[serde(default)]
    pub technical_specs: BTreeMap<String, SpecValue>,
}

/// A candidate Request for Proposal
///
/// Created by the loader from `rfps.json`; read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfp {
    /// Unique identifier (e.g. "RFP-2026-001")
    pub rfp_id: String,

    /// Tender title
    pub title: String,

    /// Issuing organization
    pub organization: String,

    /// Bid submission deadline
    pub submission_deadline: NaiveDate,

    /// Estimated total project value, if published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_value: Option<f64>,

    /// Ordered line-item requirements
    pub requirements: Vec<Requirement>,

    /// Test names the buyer requires (e.g. "high_voltage_test")
    #[serde(default)]
    pub testing_requirements: Vec<String>,

    /// Acceptance criteria, free text
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: RfpStatus,

    /// Where the RFP was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}
