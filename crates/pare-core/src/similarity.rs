//! Fuzzy string matching
//!
//! Levenshtein distance, a normalized similarity ratio on top of it, and the
//! alias scan that lines merchant names up against catalog entries.

use crate::normalize::normalize;

/// Edit distance between two strings, counted over characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity ratio in `[0, 1]`: 1.0 for identical strings, 0.0 when either
/// side is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    let dist = levenshtein(a, b);
    1.0 - dist as f64 / len_a.max(len_b).max(1) as f64
}

/// Best-scoring alias for a merchant name.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasMatch {
    /// The winning alias in its original (un-normalized) form.
    pub alias: String,
    pub score: f64,
}

/// Scan `aliases` for the one closest to `merchant`.
///
/// Both sides are normalized before comparison. An alias contained verbatim
/// in the merchant name scores 1.0; otherwise the similarity ratio applies.
/// Ties keep the earliest alias, and an empty or all-zero scan comes back
/// with an empty alias and score 0.0.
pub fn best_alias_match(merchant: &str, aliases: &[&str]) -> AliasMatch {
    let normalized_merchant = normalize(merchant);
    let mut best = AliasMatch {
        alias: String::new(),
        score: 0.0,
    };

    for alias in aliases {
        let normalized_alias = normalize(alias);
        let score = if normalized_merchant.contains(&normalized_alias) {
            1.0
        } else {
            similarity(&normalized_merchant, &normalized_alias)
        };
        if score > best.score {
            best = AliasMatch {
                alias: (*alias).to_string(),
                score,
            };
        }
    }

    best
}
