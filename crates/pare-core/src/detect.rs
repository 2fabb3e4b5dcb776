//! Recurring charge detection
//!
//! Groups transactions by normalized merchant name, classifies billing
//! cadence from the spacing between charges, and scores how confident the
//! heuristic is in each group:
//! - groups need at least 2 positive-amount charges
//! - cadence comes from the mean gap in days between consecutive charges
//! - confidence rewards sample size and regular spacing, capped below 1.0

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Frequency, RecurringCharge, Transaction};
use crate::normalize::normalize;

/// Detection never claims certainty, whatever the cadence looks like.
pub const MAX_CONFIDENCE: f64 = 0.98;

/// Find merchants whose charges repeat at a recognizable cadence.
///
/// Output is sorted by confidence, highest first. Groups with fewer than 2
/// qualifying charges or an unclassifiable cadence are dropped.
pub fn find_recurring_charges(transactions: &[Transaction]) -> Vec<RecurringCharge> {
    let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        if tx.amount <= 0.0 {
            continue;
        }
        groups
            .entry(normalize(&tx.merchant))
            .or_default()
            .push(tx.clone());
    }

    let mut charges = Vec::new();
    for (normalized_name, mut group) in groups {
        if group.len() < 2 {
            continue;
        }

        group.sort_by_key(|tx| tx.date);

        let gaps: Vec<f64> = group
            .windows(2)
            .map(|w| ((w[1].date - w[0].date).num_days() as f64).abs())
            .collect();
        let mean_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;

        let frequency = classify_frequency(mean_gap);
        if frequency == Frequency::Unknown {
            debug!(
                "Skipping {} - mean gap {:.1} days has no recognizable cadence",
                normalized_name, mean_gap
            );
            continue;
        }

        let average_amount = group.iter().map(|tx| tx.amount).sum::<f64>() / group.len() as f64;
        let confidence = score_confidence(group.len(), &gaps);

        debug!(
            "Found recurring charge: {} @ ${:.2}/{} ({} occurrences, confidence {:.2})",
            normalized_name,
            average_amount,
            frequency,
            group.len(),
            confidence
        );

        charges.push(RecurringCharge {
            merchant: group[0].merchant.clone(),
            normalized_name,
            average_amount,
            frequency,
            occurrences: group,
            confidence,
        });
    }

    // Stable sort, so equal-confidence groups keep their normalized-name order
    charges.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    charges
}

/// Classify billing cadence from the mean gap in days.
fn classify_frequency(mean_gap: f64) -> Frequency {
    if (25.0..=35.0).contains(&mean_gap) {
        Frequency::Monthly
    } else if (80.0..=110.0).contains(&mean_gap) {
        Frequency::Quarterly
    } else if (330.0..=400.0).contains(&mean_gap) {
        Frequency::Annual
    } else {
        Frequency::Unknown
    }
}

/// Score a group on sample size and spacing regularity.
///
/// Base is 0.5 for two occurrences, 0.7 for three or more. A stability bonus
/// of up to 0.3 shrinks as the spread between the widest and narrowest gap
/// grows, vanishing at 20 days.
fn score_confidence(count: usize, gaps: &[f64]) -> f64 {
    let base = if count >= 3 { 0.7 } else { 0.5 };

    // Groups always carry at least one gap; the fallback spread keeps the
    // math defined if that ever stops being true.
    let spread = if gaps.is_empty() {
        30.0
    } else {
        let max = gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = gaps.iter().copied().fold(f64::INFINITY, f64::min);
        max - min
    };

    let stability = (1.0 - spread / 20.0).clamp(0.0, 1.0);
    (base + stability * 0.3).clamp(0.0, MAX_CONFIDENCE)
}
