//! Pare Core Library
//!
//! Shared functionality for the pare subscription trimmer:
//! - Bank CSV import with header-synonym column detection
//! - Merchant name normalization and fuzzy matching
//! - Recurring charge detection from transaction history
//! - Subscription catalog with per-service savings options
//! - Catalog matching with an optional external-suggestion overlay
//! - Savings report aggregation
//! - Anonymized pattern export for external collaborators

pub mod catalog;
pub mod detect;
pub mod error;
pub mod import;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod report;
pub mod similarity;

pub use catalog::{
    CatalogMeta, Effort, SavingsOption, SubscriptionCategory, SubscriptionItem,
    SubscriptionsDatabase,
};
pub use detect::{find_recurring_charges, MAX_CONFIDENCE};
pub use error::{Error, Result};
pub use import::parse_transactions_csv;
pub use matching::{match_recurring_charges, merge_external_matches, MIN_MATCH_SCORE};
pub use models::{
    ExternalMatch, Frequency, MatchedCategory, MatchedService, RecurringCharge, SavingsReport,
    SavingsReportItem, Transaction,
};
pub use normalize::normalize;
pub use patterns::{build_anonymized_patterns, MAX_PATTERNS};
pub use report::{annualize, best_savings_option, build_savings_report};
pub use similarity::{best_alias_match, levenshtein, similarity, AliasMatch};
