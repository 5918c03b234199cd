//! Text extractor — deduplicated, normalized prose lines.

use crate::engine::dom::{DocumentHandle, TextNode};
use crate::engine::{normalize_whitespace, visibility::is_visible};
use anyhow::Result;
use std::collections::HashSet;

/// Tag allowlist the text probe selects: block/structural containers plus
/// headings and paragraphs.
pub const TEXT_TAGS: [&str; 10] = [
    "main", "article", "section", "h1", "h2", "h3", "h4", "h5", "h6", "p",
];

/// Deduplication key length: the first 200 characters of the normalized
/// line. Normalize first, then truncate. Two lines sharing a 200-char
/// prefix collide even if their tails differ; the second is suppressed.
pub const DEDUP_PREFIX_CHARS: usize = 200;

/// Pure core: visible candidates in document order, trimmed, empties
/// discarded before dedup, then deduplicated on the normalized-and-
/// truncated key. Emits the original untruncated text, newline-joined.
pub fn text_from_nodes(nodes: &[TextNode]) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    let mut lines: Vec<&str> = Vec::new();
    for node in nodes.iter().filter(|node| is_visible(&node.facts)) {
        let line = node.facts.text.trim();
        if line.is_empty() {
            continue;
        }
        let key: String = normalize_whitespace(line)
            .chars()
            .take(DEDUP_PREFIX_CHARS)
            .collect();
        if seen.insert(key) {
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// Capture fresh text candidates from the document and extract prose.
/// Returns an empty string when nothing qualifies.
pub async fn extract_text(doc: &dyn DocumentHandle) -> Result<String> {
    Ok(text_from_nodes(&doc.text_nodes().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dom::{BoundingRect, ElementFacts, StyleFacts};

    fn node(text: &str, display: &str) -> TextNode {
        TextNode {
            facts: ElementFacts {
                style: Some(StyleFacts {
                    visibility: "visible".to_string(),
                    display: display.to_string(),
                }),
                rect: BoundingRect {
                    width: 600.0,
                    height: 40.0,
                },
                text: text.to_string(),
            },
        }
    }

    #[test]
    fn test_duplicate_normalized_lines_emit_once() {
        let nodes = vec![node("Hello   world", "block"), node("Hello world", "block")];
        assert_eq!(text_from_nodes(&nodes), "Hello   world");
    }

    #[test]
    fn test_prefix_collision_beyond_200_chars_suppresses_second() {
        let shared: String = "x".repeat(200);
        let first = format!("{shared} first tail");
        let second = format!("{shared} second tail");
        let nodes = vec![node(&first, "block"), node(&second, "block")];
        assert_eq!(text_from_nodes(&nodes), first);
    }

    #[test]
    fn test_invisible_and_empty_candidates_are_dropped() {
        let nodes = vec![
            node("Heading", "block"),
            node("   \n ", "block"),
            node("Hidden paragraph", "none"),
            node("Body text", "block"),
        ];
        assert_eq!(text_from_nodes(&nodes), "Heading\nBody text");
    }

    #[test]
    fn test_document_order_is_preserved() {
        let nodes = vec![node("one", "block"), node("two", "block"), node("three", "block")];
        assert_eq!(text_from_nodes(&nodes), "one\ntwo\nthree");
    }

    #[test]
    fn test_empty_document_yields_empty_string() {
        assert_eq!(text_from_nodes(&[]), "");
    }

    #[test]
    fn test_emitted_value_is_untruncated_original() {
        let long = format!("{} tail beyond the key", "y".repeat(250));
        let nodes = vec![node(&long, "block")];
        assert_eq!(text_from_nodes(&nodes), long);
    }
}
