//! Link extractor — visible anchor text/href pairs.

use crate::engine::dom::{DocumentHandle, LinkNode};
use crate::engine::{normalize_whitespace, visibility::is_visible};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One extracted link: normalized rendered text plus the raw, unresolved
/// `href` attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub text: String,
    pub href: String,
}

/// Pure core: filter captured candidates by visibility and normalize
/// their text. No deduplication — identical hrefs or texts are all
/// emitted, in document order.
pub fn links_from_nodes(nodes: &[LinkNode]) -> Vec<LinkRecord> {
    nodes
        .iter()
        .filter(|node| is_visible(&node.facts))
        .map(|node| LinkRecord {
            text: normalize_whitespace(&node.facts.text),
            href: node.href.clone(),
        })
        .collect()
}

/// Capture fresh link candidates from the document and extract records.
pub async fn extract_links(doc: &dyn DocumentHandle) -> Result<Vec<LinkRecord>> {
    Ok(links_from_nodes(&doc.link_nodes().await?))
}
