//! Document model — raw element facts and the live-document handle.
//!
//! The engine never touches a DOM directly. A backend (Chromium via CDP,
//! or a synthetic fixture in tests) supplies per-element facts through
//! [`DocumentHandle`]; all decisions are made in Rust over those facts.
//! Facts are captured fresh on every call — layout can change between
//! calls, so nothing here is cached.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Rendered bounding-box geometry of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub width: f64,
    pub height: f64,
}

/// The two computed-style properties the visibility predicate consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleFacts {
    pub visibility: String,
    pub display: String,
}

/// Raw facts about one rendered element at capture time.
///
/// `style` is `None` when the computed style could not be resolved, e.g.
/// for a node detached mid-capture. The visibility predicate fails closed
/// on that case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementFacts {
    pub style: Option<StyleFacts>,
    pub rect: BoundingRect,
    /// Rendered (post-layout) text content, untrimmed.
    #[serde(default)]
    pub text: String,
}

/// One `a[href]` candidate, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkNode {
    pub facts: ElementFacts,
    /// Raw attribute value. Presence of the attribute is the selection
    /// criterion, so this may be empty.
    #[serde(default)]
    pub href: String,
}

/// One `<table>` candidate with raw cell text, one inner vec per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableNode {
    /// Facts for the table element itself; row visibility is never checked.
    pub facts: ElementFacts,
    #[serde(default)]
    pub header_rows: Vec<Vec<String>>,
    #[serde(default)]
    pub body_rows: Vec<Vec<String>>,
}

/// One text-bearing candidate from the block/heading/paragraph allowlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub facts: ElementFacts,
}

/// Handle to one live document.
///
/// The `*_nodes` methods capture candidate facts in document (depth-first,
/// pre-order) order. The scroll methods command and measure the document's
/// scroll state. A handle is read-only apart from scrolling; concurrent
/// invocations against the same document are unsupported.
#[async_trait]
pub trait DocumentHandle: Send + Sync {
    /// Capture every element carrying a hyperlink-reference attribute.
    async fn link_nodes(&self) -> Result<Vec<LinkNode>>;

    /// Capture every table element with its raw header and body cells.
    async fn table_nodes(&self) -> Result<Vec<TableNode>>;

    /// Capture every element matching the text-extraction tag allowlist.
    async fn text_nodes(&self) -> Result<Vec<TextNode>>;

    /// Scroll the document to its current maximum extent.
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Measure the document's current scroll extent.
    async fn scroll_extent(&self) -> Result<f64>;
}
