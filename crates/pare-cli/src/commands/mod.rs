//! CLI command implementations
//!
//! Commands are organized by what they operate on:
//! - `analyze` - CSV analysis commands (analyze, recurring, patterns)
//! - `catalog` - Catalog loading and inspection (list, show)

pub mod analyze;
pub mod catalog;

// Re-export command functions for main.rs
pub use analyze::*;
pub use catalog::*;

/// Truncate a string to a maximum width, adding "..." if truncated.
/// Counts chars, not bytes, so multi-byte merchant names don't panic.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
