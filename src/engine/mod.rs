//! Extraction & convergence engine.
//!
//! Pure decision logic over raw per-element facts captured from a live
//! page: visibility classification, whitespace normalization and
//! deduplication, table reconstruction, and scroll-driven lazy-load
//! convergence. Every entry point takes an explicit [`dom::DocumentHandle`]
//! so the engine can be tested against synthetic fixtures without a
//! browser. Extractors never call each other; the harness composes them.

pub mod dom;
pub mod links;
pub mod scroll;
pub mod tables;
pub mod text;
pub mod visibility;

pub use dom::DocumentHandle;
pub use links::{extract_links, LinkRecord};
pub use scroll::{run_scroll_convergence, ScrollConfig, ScrollOutcome};
pub use tables::{extract_tables, TableRecord};
pub use text::extract_text;
pub use visibility::is_visible;

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
