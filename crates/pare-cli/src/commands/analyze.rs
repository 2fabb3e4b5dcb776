//! CSV analysis commands (analyze, recurring, patterns)

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use pare_core::{
    build_anonymized_patterns, build_savings_report, find_recurring_charges,
    match_recurring_charges, merge_external_matches, parse_transactions_csv, ExternalMatch,
    MatchedService, RecurringCharge, SavingsReport, SubscriptionsDatabase, Transaction,
};

use super::truncate;

/// Parse transactions out of a bank CSV export.
pub fn load_transactions(file: &Path) -> Result<Vec<Transaction>> {
    let reader =
        std::fs::File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let transactions = parse_transactions_csv(std::io::BufReader::new(reader))
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    Ok(transactions)
}

/// Load external match suggestions from a JSON file.
pub fn load_overlay(file: &Path) -> Result<Vec<ExternalMatch>> {
    let reader =
        std::fs::File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let suggestions: Vec<ExternalMatch> = serde_json::from_reader(std::io::BufReader::new(reader))
        .with_context(|| format!("Failed to parse overlay {}", file.display()))?;
    Ok(suggestions)
}

pub fn cmd_analyze(
    file: &Path,
    overlay: Option<&Path>,
    catalog: &SubscriptionsDatabase,
    json_output: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    let recurring = find_recurring_charges(&transactions);
    let mut matches = match_recurring_charges(&recurring, catalog);

    if let Some(path) = overlay {
        let suggestions = load_overlay(path)?;
        merge_external_matches(&mut matches, &suggestions, catalog);
    }

    let report = build_savings_report(&matches);

    // JSON mode always emits one document, even with nothing detected
    if json_output {
        let payload = json!({
            "recurring": recurring,
            "matches": matches,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if recurring.is_empty() {
        println!("No recurring charges detected. Try an export covering 3+ months.");
        return Ok(());
    }

    print_recurring_table(&recurring);
    print_matches_table(&matches);
    print_report(&report);
    Ok(())
}

pub fn cmd_recurring(file: &Path, json_output: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let recurring = find_recurring_charges(&transactions);

    // JSON mode prints the list as-is; an empty export gives `[]`
    if json_output {
        println!("{}", serde_json::to_string_pretty(&recurring)?);
        return Ok(());
    }

    if recurring.is_empty() {
        println!("No recurring charges detected. Try an export covering 3+ months.");
        return Ok(());
    }

    print_recurring_table(&recurring);
    Ok(())
}

pub fn cmd_patterns(file: &Path) -> Result<()> {
    let transactions = load_transactions(file)?;
    let recurring = find_recurring_charges(&transactions);

    for line in build_anonymized_patterns(&recurring) {
        println!("{}", line);
    }
    Ok(())
}

fn print_recurring_table(recurring: &[RecurringCharge]) {
    println!();
    println!("🔁 Recurring Charges");
    println!("   ──────────────────────────────────────────────────────────────");
    println!(
        "   {:24} │ {:>8} │ {:9} │ {:>4} │ {:>5}",
        "Merchant", "$/cycle", "Cadence", "Seen", "Conf"
    );
    println!("   ─────────────────────────┼──────────┼───────────┼──────┼──────");
    for charge in recurring {
        println!(
            "   {:24} │ {:>8.2} │ {:9} │ {:>4} │ {:>4.0}%",
            truncate(&charge.merchant, 24),
            charge.average_amount,
            charge.frequency.as_str(),
            charge.occurrences.len(),
            charge.confidence * 100.0
        );
    }
}

fn print_matches_table(matches: &[MatchedService]) {
    println!();
    println!("🎯 Catalog Matches");
    println!("   ──────────────────────────────────────────────────────────────");
    for m in matches {
        match (&m.subscription, &m.category) {
            (Some(subscription), Some(category)) => {
                println!(
                    "   ✅ {:24} → {} ({}, {:.0}% match)",
                    truncate(&m.recurring.merchant, 24),
                    subscription.name,
                    category.label,
                    m.match_confidence * 100.0
                );
            }
            _ => {
                println!(
                    "   ❓ {:24} → no catalog match (best {:.0}%)",
                    truncate(&m.recurring.merchant, 24),
                    m.match_confidence * 100.0
                );
            }
        }
    }
}

fn print_report(report: &SavingsReport) {
    println!();
    println!("💰 Savings Report");
    println!("   ──────────────────────────────────────────────────────────────");
    println!(
        "   Current annual spend: ${:.2}",
        report.total_current_annual
    );
    println!(
        "   Potential savings:    ${:.2}/yr",
        report.total_potential_savings
    );

    if report.items.is_empty() {
        println!();
        println!("   No matched subscriptions to suggest savings for.");
        return;
    }

    println!();
    println!(
        "   {:20} │ {:14} │ {:>8} │ {:>9} │ {}",
        "Service", "Category", "$/mo", "Save/yr", "Best option"
    );
    println!("   ─────────────────────┼────────────────┼──────────┼───────────┼────────────────");
    for item in &report.items {
        let best = item
            .best_option
            .as_ref()
            .map(|o| o.method.as_str())
            .unwrap_or("-");
        println!(
            "   {:20} │ {:14} │ {:>8.2} │ {:>9.2} │ {}",
            truncate(&item.service, 20),
            truncate(&item.category, 14),
            item.current_cost_monthly,
            item.annual_savings,
            truncate(best, 28)
        );
    }
}
