//! RFP selection - deadline filtering and candidate scoring
//!
//! Picks exactly one RFP to answer: candidates whose deadline falls inside
//! the bid window are scored on project value, time available, organization
//! type, and product complexity; the highest total wins. All entry points
//! take `today` explicitly so a run is reproducible.

use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::rfp::Rfp;

/// Default bid window in days
pub const DEFAULT_MAX_DAYS: i64 = 90;

/// Organizations scoring the full 20 org points
const PUBLIC_ORG_KEYWORDS: &[&str] = &["government", "metro", "railway", "corporation"];

/// Organizations scoring 15 org points (PSUs and listed companies)
const PSU_ORG_KEYWORDS: &[&str] = &["limited", "ltd", "bhel", "ntpc"];

/// Requirement descriptions carrying these fragments count as complex
const COMPLEX_PRODUCT_KEYWORDS: &[&str] = &["xlpe", "33kv", "11kv", "armoured"];

/// Score breakdown for one candidate RFP
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RfpScore {
    /// Project value in millions, capped at 40
    pub value_score: f64,

    /// Days remaining / 3, capped at 30
    pub time_score: f64,

    /// 20 for public bodies, 15 for PSUs/limited companies, 10 otherwise
    pub org_score: f64,

    /// 2 per complex line item, capped at 10
    pub complexity_score: f64,
}

impl RfpScore {
    pub fn total(&self) -> f64 {
        self.value_score + self.time_score + self.org_score + self.complexity_score
    }
}

/// Integer calendar days from `today` until `deadline` (negative if past)
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    deadline.signed_duration_since(today).num_days()
}

/// Keep candidates whose deadline is between 0 and `max_days` out, inclusive
pub fn filter_by_deadline<'a>(rfps: &'a [Rfp], today: NaiveDate, max_days: i64) -> Vec<&'a Rfp> {
    rfps.iter()
        .filter(|rfp| {
            let days = days_until(rfp.submission_deadline, today);
            (0..=max_days).contains(&days)
        })
        .collect()
}

/// Score one candidate
pub fn score(rfp: &Rfp, today: NaiveDate) -> RfpScore {
    let value_score = match rfp.project_value {
        Some(value) => (value / 1_000_000.0).min(40.0),
        None => 0.0,
    };

    let days_remaining = days_until(rfp.submission_deadline, today);
    let time_score = (days_remaining as f64 / 3.0).min(30.0);

    let org = rfp.organization.to_lowercase();
    let org_score = if PUBLIC_ORG_KEYWORDS.iter().any(|k| org.contains(k)) {
        20.0
    } else if PSU_ORG_KEYWORDS.iter().any(|k| org.contains(k)) {
        15.0
    } else {
        10.0
    };

    let complex_items = rfp
        .requirements
        .iter()
        .filter(|req| {
            let desc = req.description.to_lowercase();
            COMPLEX_PRODUCT_KEYWORDS.iter().any(|k| desc.contains(k))
        })
        .count();
    let complexity_score = (2.0 * complex_items as f64).min(10.0);

    RfpScore {
        value_score,
        time_score,
        org_score,
        complexity_score,
    }
}

/// Select the highest-scoring RFP inside the bid window
///
/// Ties go to the earlier candidate in input order. Returns `None` when no
/// candidate passes the deadline filter.
pub fn select<'a>(rfps: &'a [Rfp], today: NaiveDate, max_days: i64) -> Option<&'a Rfp> {
    let mut best: Option<(&Rfp, f64)> = None;

    for rfp in filter_by_deadline(rfps, today, max_days) {
        let total = score(rfp, today).total();
        // strictly-greater keeps the first-seen candidate on ties
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((rfp, total)),
        }
    }

    best.map(|(rfp, _)| rfp)
}
