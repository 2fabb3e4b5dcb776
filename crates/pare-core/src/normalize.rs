//! Merchant name canonicalization
//!
//! Bank exports render the same merchant a dozen ways ("Netflix.com",
//! "NETFLIX *SUB", "NETFLIX COM 866-579-7172"). Grouping and matching both
//! run on the canonical form produced here.

/// Canonicalize a merchant name for grouping and comparison.
///
/// Uppercases the input, collapses every run of characters outside
/// `[A-Z0-9 ]` to a single space, collapses whitespace runs, and trims.
/// Total and idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(merchant: &str) -> String {
    let mut out = String::with_capacity(merchant.len());
    let mut pending_space = false;

    for ch in merchant.chars().flat_map(char::to_uppercase) {
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            // Whitespace and symbols both separate; runs collapse to one space
            pending_space = true;
        }
    }

    out
}
