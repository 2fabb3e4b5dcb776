//! Savings report
//!
//! Rolls a match list up into annualized spend and potential savings.

use crate::catalog::SavingsOption;
use crate::models::{Frequency, MatchedService, SavingsReport, SavingsReportItem};

/// Annualize a per-period amount by billing cadence.
pub fn annualize(amount: f64, frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Monthly => amount * 12.0,
        Frequency::Quarterly => amount * 4.0,
        Frequency::Annual => amount,
        // Unknown never survives detection; treat it like monthly if it does
        Frequency::Unknown => amount * 12.0,
    }
}

/// Pick the option with the highest annual savings. Ties keep the first,
/// and an empty list has no best option.
pub fn best_savings_option(options: &[SavingsOption]) -> Option<&SavingsOption> {
    let mut best: Option<&SavingsOption> = None;
    for option in options {
        if best.map_or(true, |b| option.savings_annual > b.savings_annual) {
            best = Some(option);
        }
    }
    best
}

/// Build the savings roll-up from a match list.
///
/// Annualized cost counts every entry, matched or not. Savings and report
/// items only cover entries that resolved to a catalog subscription, and a
/// negative best-option saving is clamped to zero rather than surfaced as a
/// loss. Item order follows match order.
pub fn build_savings_report(matches: &[MatchedService]) -> SavingsReport {
    let mut total_current_annual = 0.0;
    let mut total_potential_savings = 0.0;
    let mut items = Vec::new();

    for m in matches {
        total_current_annual += annualize(m.recurring.average_amount, m.recurring.frequency);

        let (Some(subscription), Some(category)) = (&m.subscription, &m.category) else {
            continue;
        };

        let best_option = best_savings_option(&subscription.savings_options);
        let annual_savings = best_option.map_or(0.0, |o| o.savings_annual.max(0.0));
        total_potential_savings += annual_savings;

        items.push(SavingsReportItem {
            service: subscription.name.clone(),
            category: category.label.clone(),
            current_cost_monthly: m.recurring.average_amount,
            annual_savings,
            best_option: best_option.cloned(),
            options: subscription.savings_options.clone(),
        });
    }

    SavingsReport {
        total_current_annual,
        total_potential_savings,
        items,
    }
}
