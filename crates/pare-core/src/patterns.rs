//! Anonymized pattern export
//!
//! Renders recurring charges as short text lines safe to hand to an
//! external matching collaborator: normalized merchant, rounded amount,
//! cadence, and occurrence count. Nothing else from the source rows leaks.

use crate::models::RecurringCharge;

/// Upper bound on pattern lines in a single export.
pub const MAX_PATTERNS: usize = 60;

/// Render recurring charges as anonymized pattern lines.
///
/// At most [`MAX_PATTERNS`] lines come back. Detection output arrives
/// sorted by confidence, so the clip keeps the strongest candidates.
pub fn build_anonymized_patterns(recurring: &[RecurringCharge]) -> Vec<String> {
    recurring
        .iter()
        .take(MAX_PATTERNS)
        .map(|charge| {
            format!(
                "{} ${:.2} - occurs {} ({} times)",
                charge.normalized_name,
                charge.average_amount,
                charge.frequency,
                charge.occurrences.len()
            )
        })
        .collect()
}
