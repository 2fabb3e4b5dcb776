//! Catalog loading and inspection commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use pare_core::SubscriptionsDatabase;

use super::truncate;

/// Location of a user-managed catalog snapshot, e.g.
/// `~/.local/share/pare/subscriptions.json` on Linux.
fn default_catalog_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("pare").join("subscriptions.json"))
}

/// Load the subscription catalog.
///
/// Resolution order: the `--catalog` flag, the `PARE_CATALOG` environment
/// variable, a snapshot in the user data dir, then the copy bundled into
/// the binary.
pub fn load_catalog(flag: Option<&Path>) -> Result<SubscriptionsDatabase> {
    if let Some(path) = flag {
        debug!("Loading catalog from --catalog {}", path.display());
        return SubscriptionsDatabase::from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()));
    }

    if let Ok(path) = std::env::var("PARE_CATALOG") {
        debug!("Loading catalog from PARE_CATALOG={}", path);
        return SubscriptionsDatabase::from_path(Path::new(&path))
            .with_context(|| format!("Failed to load catalog from {}", path));
    }

    if let Some(path) = default_catalog_path() {
        if path.exists() {
            debug!("Loading catalog from {}", path.display());
            return SubscriptionsDatabase::from_path(&path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()));
        }
    }

    debug!("Using bundled catalog");
    SubscriptionsDatabase::bundled().context("Failed to load bundled catalog")
}

pub fn cmd_catalog_list(catalog: &SubscriptionsDatabase) -> Result<()> {
    println!();
    println!(
        "📒 Subscription Catalog (v{}, {} services, updated {})",
        catalog.meta.version,
        catalog.total_items(),
        catalog.meta.last_updated
    );
    println!("   ─────────────────────────────────────────────────────────────────────");

    for (key, category) in &catalog.categories {
        println!();
        println!("   {} {} ({})", category.icon, category.label, key);
        for item in &category.items {
            let best = item
                .savings_options
                .iter()
                .map(|o| o.savings_annual)
                .fold(f64::NEG_INFINITY, f64::max);
            let savings = if best > 0.0 {
                format!("save up to ${:.2}/yr", best)
            } else {
                "-".to_string()
            };
            println!(
                "      {:24} │ {:>8} │ {:18} │ {}",
                truncate(&item.name, 24),
                format!("${:.2}", item.typical_price),
                truncate(&item.tier, 18),
                savings
            );
        }
    }

    println!();
    Ok(())
}

pub fn cmd_catalog_show(catalog: &SubscriptionsDatabase, name: &str) -> Result<()> {
    let Some((key, category, item)) = catalog.find_by_name(name) else {
        anyhow::bail!("No catalog entry named '{}'. Try: pare catalog list", name);
    };

    println!();
    println!(
        "🔎 {} ({} {} / {})",
        item.name, category.icon, category.label, key
    );
    println!("   Typical price: ${:.2}/mo ({})", item.typical_price, item.tier);
    if !item.aliases.is_empty() {
        println!("   Aliases: {}", item.aliases.join(", "));
    }
    println!("   ─────────────────────────────────────────────────────────────────────");

    if item.savings_options.is_empty() {
        println!("   No savings options on file for this service.");
        println!();
        return Ok(());
    }

    for option in &item.savings_options {
        println!();
        println!(
            "   💰 {} (${:.2}/mo, saves ${:.2}/yr, effort: {})",
            option.method, option.new_price, option.savings_annual, option.effort
        );
        if let Some(link) = &option.link {
            println!("      Link: {}", link);
        }
        if let Some(instructions) = &option.instructions {
            println!("      How: {}", instructions);
        }
        if let Some(script) = &option.negotiation_script {
            println!("      Script: \"{}\"", script);
        }
        if let Some(note) = &option.note {
            println!("      Note: {}", note);
        }
        if option.affiliate {
            println!("      (affiliate link)");
        }
    }

    println!();
    Ok(())
}
