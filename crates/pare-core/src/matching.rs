//! Catalog matching
//!
//! Scores each recurring charge against every catalog item and keeps the
//! best candidate when it clears the acceptance threshold. An optional
//! second pass folds in externally produced suggestions without ever
//! downgrading a local match.

use tracing::debug;

use crate::catalog::{SubscriptionCategory, SubscriptionItem, SubscriptionsDatabase};
use crate::models::{ExternalMatch, MatchedCategory, MatchedService, RecurringCharge};
use crate::normalize::normalize;
use crate::similarity::{best_alias_match, similarity};

/// Minimum score for a fuzzy match to count as authoritative.
pub const MIN_MATCH_SCORE: f64 = 0.78;

/// Match each recurring charge against the catalog.
///
/// One output entry per input charge, in input order. An entry below the
/// threshold keeps its best score but carries no subscription or category.
/// Ties go to the first item in catalog scan order.
pub fn match_recurring_charges(
    recurring: &[RecurringCharge],
    catalog: &SubscriptionsDatabase,
) -> Vec<MatchedService> {
    let mut results = Vec::with_capacity(recurring.len());

    for charge in recurring {
        let normalized_merchant = normalize(&charge.merchant);
        let mut best: Option<(f64, &str, &SubscriptionCategory, &SubscriptionItem)> = None;

        for (key, category, item) in catalog.iter_items() {
            let candidates: Vec<&str> = std::iter::once(item.name.as_str())
                .chain(item.aliases.iter().map(String::as_str))
                .collect();
            let alias_score = best_alias_match(&normalized_merchant, &candidates).score;
            let name_score = similarity(&normalize(&item.name), &normalized_merchant);
            let score = alias_score.max(name_score);

            if best.map_or(true, |(best_score, ..)| score > best_score) {
                best = Some((score, key, category, item));
            }
        }

        match best {
            Some((score, key, category, item)) if score >= MIN_MATCH_SCORE => {
                debug!(
                    "Matched {} -> {} ({:.2})",
                    charge.merchant, item.name, score
                );
                results.push(MatchedService {
                    recurring: charge.clone(),
                    subscription: Some(item.clone()),
                    category: Some(MatchedCategory {
                        key: key.to_string(),
                        label: category.label.clone(),
                    }),
                    match_confidence: score,
                });
            }
            _ => {
                results.push(MatchedService {
                    recurring: charge.clone(),
                    subscription: None,
                    category: None,
                    match_confidence: best.map_or(0.0, |(score, ..)| score),
                });
            }
        }
    }

    results
}

/// Fold externally produced suggestions into a match list.
///
/// Suggestions are applied in sequence, so for a duplicated index the last
/// qualifying suggestion wins. A suggestion only lands when its service name
/// resolves in the catalog and its confidence is at least the entry's
/// current one; confidence takes the max of the two and never decreases.
pub fn merge_external_matches(
    matches: &mut [MatchedService],
    suggestions: &[ExternalMatch],
    catalog: &SubscriptionsDatabase,
) {
    for suggestion in suggestions {
        let Some(service_name) = suggestion.service_name.as_deref() else {
            continue;
        };
        let Some(entry) = matches.get_mut(suggestion.index) else {
            debug!(
                "Ignoring suggestion for out-of-range index {}",
                suggestion.index
            );
            continue;
        };
        let Some((key, category, item)) = catalog.find_by_name(service_name) else {
            debug!("Ignoring suggestion for unknown service {}", service_name);
            continue;
        };
        if suggestion.confidence < entry.match_confidence {
            continue;
        }

        entry.subscription = Some(item.clone());
        entry.category = Some(MatchedCategory {
            key: key.to_string(),
            label: category.label.clone(),
        });
        entry.match_confidence = entry.match_confidence.max(suggestion.confidence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogMeta;
    use crate::models::Frequency;
    use std::collections::BTreeMap;

    fn item(name: &str, aliases: &[&str]) -> SubscriptionItem {
        SubscriptionItem {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            typical_price: 9.99,
            tier: "Standard".to_string(),
            savings_options: vec![],
        }
    }

    fn catalog(categories: Vec<(&str, &str, Vec<SubscriptionItem>)>) -> SubscriptionsDatabase {
        let total = categories.iter().map(|(_, _, items)| items.len()).sum();
        let keys: Vec<String> = categories.iter().map(|(k, _, _)| k.to_string()).collect();
        SubscriptionsDatabase {
            meta: CatalogMeta {
                last_updated: "2025-01-01".to_string(),
                version: "test".to_string(),
                total_services: total,
                categories: keys,
            },
            categories: categories
                .into_iter()
                .map(|(key, label, items)| {
                    (
                        key.to_string(),
                        SubscriptionCategory {
                            label: label.to_string(),
                            icon: "📦".to_string(),
                            items,
                        },
                    )
                })
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn streaming_catalog() -> SubscriptionsDatabase {
        catalog(vec![(
            "streaming",
            "Streaming",
            vec![
                item("Netflix", &["netflix.com"]),
                item("Spotify", &["spotify usa"]),
            ],
        )])
    }

    fn charge(merchant: &str) -> RecurringCharge {
        RecurringCharge {
            merchant: merchant.to_string(),
            normalized_name: normalize(merchant),
            average_amount: 15.49,
            frequency: Frequency::Monthly,
            occurrences: vec![],
            confidence: 0.9,
        }
    }

    #[test]
    fn test_alias_substring_match() {
        let matches =
            match_recurring_charges(&[charge("NETFLIX.COM 866-579-7172")], &streaming_catalog());
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.subscription.as_ref().unwrap().name, "Netflix");
        assert_eq!(m.category.as_ref().unwrap().key, "streaming");
        assert_eq!(m.category.as_ref().unwrap().label, "Streaming");
        assert_eq!(m.match_confidence, 1.0);
    }

    #[test]
    fn test_below_threshold_keeps_score() {
        let matches =
            match_recurring_charges(&[charge("LOCAL HARDWARE STORE")], &streaming_catalog());
        let m = &matches[0];
        assert!(m.subscription.is_none());
        assert!(m.category.is_none());
        assert!(m.match_confidence > 0.0);
        assert!(m.match_confidence < MIN_MATCH_SCORE);
    }

    #[test]
    fn test_empty_catalog_scores_zero() {
        let empty = catalog(vec![]);
        let matches = match_recurring_charges(&[charge("NETFLIX.COM")], &empty);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].subscription.is_none());
        assert_eq!(matches[0].match_confidence, 0.0);
    }

    #[test]
    fn test_one_output_per_input_in_order() {
        let charges = vec![
            charge("SPOTIFY USA"),
            charge("LOCAL HARDWARE STORE"),
            charge("NETFLIX.COM"),
        ];
        let matches = match_recurring_charges(&charges, &streaming_catalog());
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].recurring.merchant, "SPOTIFY USA");
        assert_eq!(matches[1].recurring.merchant, "LOCAL HARDWARE STORE");
        assert_eq!(matches[2].recurring.merchant, "NETFLIX.COM");
    }

    #[test]
    fn test_ties_keep_first_in_scan_order() {
        // Identical item in two categories; ascending key order wins
        let db = catalog(vec![
            ("audio", "Audio", vec![item("Acme Plus", &[])]),
            ("video", "Video", vec![item("Acme Plus", &[])]),
        ]);
        let matches = match_recurring_charges(&[charge("ACME PLUS")], &db);
        assert_eq!(matches[0].category.as_ref().unwrap().key, "audio");
        assert_eq!(matches[0].match_confidence, 1.0);
    }

    #[test]
    fn test_threshold_boundary() {
        // 32-char names; 7 substitutions score 1 - 7/32 = 0.78125,
        // 8 substitutions score 0.75
        let name = "ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEF";
        let db = catalog(vec![("software", "Software", vec![item(name, &[])])]);

        let accepted = "ABCDEFGHIJKLMNOPQRSTUVWXY1234567";
        let matches = match_recurring_charges(&[charge(accepted)], &db);
        assert_eq!(matches[0].match_confidence, 0.78125);
        assert!(matches[0].subscription.is_some());

        let rejected = "ABCDEFGHIJKLMNOPQRSTUVWX12345678";
        let matches = match_recurring_charges(&[charge(rejected)], &db);
        assert_eq!(matches[0].match_confidence, 0.75);
        assert!(matches[0].subscription.is_none());
    }

    fn unmatched(merchant: &str, confidence: f64) -> MatchedService {
        MatchedService {
            recurring: charge(merchant),
            subscription: None,
            category: None,
            match_confidence: confidence,
        }
    }

    #[test]
    fn test_merge_skips_bad_suggestions() {
        let db = streaming_catalog();
        let mut matches = vec![unmatched("NETFLX", 0.6)];
        let suggestions = vec![
            ExternalMatch {
                index: 0,
                service_name: None,
                confidence: 0.99,
            },
            ExternalMatch {
                index: 0,
                service_name: Some("Definitely Not A Service".to_string()),
                confidence: 0.99,
            },
            ExternalMatch {
                index: 5,
                service_name: Some("Netflix".to_string()),
                confidence: 0.99,
            },
        ];
        merge_external_matches(&mut matches, &suggestions, &db);
        assert!(matches[0].subscription.is_none());
        assert_eq!(matches[0].match_confidence, 0.6);
    }

    #[test]
    fn test_merge_ignores_lower_confidence() {
        let db = streaming_catalog();
        let mut matches = vec![unmatched("NETFLX", 0.6)];
        let suggestions = vec![ExternalMatch {
            index: 0,
            service_name: Some("Netflix".to_string()),
            confidence: 0.5,
        }];
        merge_external_matches(&mut matches, &suggestions, &db);
        assert!(matches[0].subscription.is_none());
        assert_eq!(matches[0].match_confidence, 0.6);
    }

    #[test]
    fn test_merge_applies_at_equal_confidence() {
        let db = streaming_catalog();
        let mut matches = vec![unmatched("NETFLX", 0.5)];
        let suggestions = vec![ExternalMatch {
            index: 0,
            service_name: Some("netflix".to_string()),
            confidence: 0.5,
        }];
        merge_external_matches(&mut matches, &suggestions, &db);
        assert_eq!(matches[0].subscription.as_ref().unwrap().name, "Netflix");
        assert_eq!(matches[0].category.as_ref().unwrap().key, "streaming");
        assert_eq!(matches[0].match_confidence, 0.5);
    }

    #[test]
    fn test_merge_takes_max_confidence() {
        let db = streaming_catalog();
        let mut matches = vec![unmatched("NETFLX", 0.6)];
        let suggestions = vec![ExternalMatch {
            index: 0,
            service_name: Some("Netflix".to_string()),
            confidence: 0.9,
        }];
        merge_external_matches(&mut matches, &suggestions, &db);
        assert_eq!(matches[0].subscription.as_ref().unwrap().name, "Netflix");
        assert_eq!(matches[0].match_confidence, 0.9);
    }

    #[test]
    fn test_merge_duplicate_indices_last_wins() {
        let db = streaming_catalog();
        let mut matches = vec![unmatched("MYSTERY SUB", 0.1)];
        let suggestions = vec![
            ExternalMatch {
                index: 0,
                service_name: Some("Netflix".to_string()),
                confidence: 0.8,
            },
            ExternalMatch {
                index: 0,
                service_name: Some("Spotify".to_string()),
                confidence: 0.9,
            },
        ];
        merge_external_matches(&mut matches, &suggestions, &db);
        assert_eq!(matches[0].subscription.as_ref().unwrap().name, "Spotify");
        assert_eq!(matches[0].match_confidence, 0.9);
    }

    #[test]
    fn test_merge_never_downgrades() {
        let db = streaming_catalog();
        let mut matches = match_recurring_charges(&[charge("NETFLIX.COM")], &db);
        assert_eq!(matches[0].match_confidence, 1.0);

        let suggestions = vec![ExternalMatch {
            index: 0,
            service_name: Some("Spotify".to_string()),
            confidence: 0.5,
        }];
        merge_external_matches(&mut matches, &suggestions, &db);
        assert_eq!(matches[0].subscription.as_ref().unwrap().name, "Netflix");
        assert_eq!(matches[0].match_confidence, 1.0);
    }
}
