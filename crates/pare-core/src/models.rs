//! Domain models for pare

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{SavingsOption, SubscriptionItem};

/// A single imported bank transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub merchant: String,
    /// Charge amount, always stored as a positive value.
    pub amount: f64,
    pub category: Option<String>,
    /// Source CSV row serialized as JSON, kept for auditing.
    pub raw: String,
}

/// Billing cadence inferred from the spacing of charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
    Unknown,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" => Ok(Self::Annual),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A merchant whose charges repeat at a recognizable cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringCharge {
    /// Display name, taken from the chronologically first occurrence.
    pub merchant: String,
    pub normalized_name: String,
    pub average_amount: f64,
    pub frequency: Frequency,
    /// Occurrences sorted by date, oldest first.
    pub occurrences: Vec<Transaction>,
    /// Detection confidence in `[0, 0.98]`.
    pub confidence: f64,
}

/// Category a matched service belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedCategory {
    pub key: String,
    pub label: String,
}

/// A recurring charge paired with its catalog entry, when one scored high
/// enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedService {
    pub recurring: RecurringCharge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MatchedCategory>,
    pub match_confidence: f64,
}

/// Match suggestion produced outside the local scorer, e.g. by a reviewer
/// pass over the unmatched entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalMatch {
    /// Position of the target entry in the match list.
    pub index: usize,
    /// Catalog service name, or `None` when the suggester found nothing.
    pub service_name: Option<String>,
    pub confidence: f64,
}

/// One matched subscription with its savings options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsReportItem {
    pub service: String,
    pub category: String,
    pub current_cost_monthly: f64,
    /// Annual savings of the best option, clamped to zero.
    pub annual_savings: f64,
    pub best_option: Option<SavingsOption>,
    pub options: Vec<SavingsOption>,
}

/// Roll-up of every matched subscription and what switching could save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsReport {
    pub total_current_annual: f64,
    pub total_potential_savings: f64,
    pub items: Vec<SavingsReportItem>,
}
