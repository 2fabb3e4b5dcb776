//! Subscription catalog
//!
//! Static reference data mapping services to merchant aliases and savings
//! options. A snapshot ships with the crate; callers can load their own
//! JSON file in the same shape.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How much effort a savings option takes to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Easy,
    Medium,
    Hard,
}

impl Effort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One way to cut the cost of a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsOption {
    pub method: String,
    pub new_price: f64,
    pub savings_monthly: f64,
    pub savings_annual: f64,
    pub effort: Effort,
    pub link: Option<String>,
    pub affiliate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiation_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A subscription service and the merchant aliases it shows up under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub name: String,
    pub aliases: Vec<String>,
    pub typical_price: f64,
    pub tier: String,
    pub savings_options: Vec<SavingsOption>,
}

/// A named group of catalog items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCategory {
    pub label: String,
    pub icon: String,
    pub items: Vec<SubscriptionItem>,
}

/// Snapshot metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMeta {
    pub last_updated: String,
    pub version: String,
    pub total_services: usize,
    pub categories: Vec<String>,
}

/// The full catalog: category key to category, plus snapshot metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionsDatabase {
    pub meta: CatalogMeta,
    pub categories: BTreeMap<String, SubscriptionCategory>,
}

impl SubscriptionsDatabase {
    /// The catalog snapshot bundled with the crate.
    pub fn bundled() -> Result<Self> {
        let db = serde_json::from_str(include_str!("../data/subscriptions.json"))?;
        Ok(db)
    }

    /// Load a catalog snapshot from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Load a catalog snapshot from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let db = serde_json::from_reader(reader)?;
        Ok(db)
    }

    /// Iterate every item in the catalog, flattened across categories.
    ///
    /// Order is deterministic: ascending category key, then item order
    /// within the category. Matching tie-breaks rely on this scan order.
    pub fn iter_items(
        &self,
    ) -> impl Iterator<Item = (&str, &SubscriptionCategory, &SubscriptionItem)> {
        self.categories.iter().flat_map(|(key, category)| {
            category
                .items
                .iter()
                .map(move |item| (key.as_str(), category, item))
        })
    }

    /// Look up an item by exact name, ignoring case and surrounding
    /// whitespace. First match in scan order wins.
    pub fn find_by_name(
        &self,
        name: &str,
    ) -> Option<(&str, &SubscriptionCategory, &SubscriptionItem)> {
        let needle = name.trim().to_lowercase();
        self.iter_items()
            .find(|(_, _, item)| item.name.to_lowercase() == needle)
    }

    /// Total number of items across all categories.
    pub fn total_items(&self) -> usize {
        self.categories.values().map(|c| c.items.len()).sum()
    }
}
