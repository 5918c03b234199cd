//! URL normalization and link cleanup.
//!
//! The engine emits raw, unresolved hrefs. This module is the harness-side
//! post-processing pass: resolve against the final page URL, drop
//! non-navigational schemes, and deduplicate by normalized href.

use crate::engine::LinkRecord;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use url::Url;

/// Href prefixes that never lead to a fetchable page.
const SKIPPED_PREFIXES: [&str; 4] = ["#", "javascript:", "mailto:", "tel:"];

/// Host normalized for domain comparison: lowercased, default port
/// stripped, leading `www.` and trailing dot removed. Unparseable input
/// yields an empty string.
pub fn normalize_host(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host.trim_end_matches('.');
    // The url crate already reports None for a scheme's default port.
    match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Whether two URLs belong to the same (normalized) domain.
pub fn same_domain(a: &str, b: &str) -> bool {
    let host = normalize_host(a);
    !host.is_empty() && host == normalize_host(b)
}

/// Canonical form used as the deduplication key: lowercased scheme and
/// host, default port / `www.` / trailing dot stripped, root path
/// collapsed and trailing path slashes removed, query kept, fragment
/// dropped. Input that cannot be parsed is returned unchanged.
pub fn normalize_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if parsed.host_str().is_none() {
        return url.to_string();
    }
    let host = normalize_host(url);
    let path = match parsed.path() {
        "/" => "",
        p => p.trim_end_matches('/'),
    };
    let mut out = format!("{}://{}{}", parsed.scheme(), host, path);
    if let Some(query) = parsed.query() {
        out.push('?');
        out.push_str(query);
    }
    out
}

/// Resolve `href` against `base`; on failure the href passes through
/// unchanged.
pub fn absolutize(base: &str, href: &str) -> String {
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Clean raw engine link output against the page it came from.
///
/// Drops empty hrefs and fragment/`javascript:`/`mailto:`/`tel:` targets,
/// absolutizes the rest, and deduplicates by normalized href. The first
/// occurrence wins its slot in the output order; a later duplicate can
/// only contribute its text when the kept entry's text is empty.
pub fn clean_links(records: &[LinkRecord], base_url: &str) -> Vec<LinkRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut texts: HashMap<String, String> = HashMap::new();

    for record in records {
        let href = record.href.trim();
        if href.is_empty() || SKIPPED_PREFIXES.iter().any(|p| href.starts_with(p)) {
            continue;
        }
        let key = normalize_url(&absolutize(base_url, href));
        match texts.entry(key) {
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                slot.insert(record.text.clone());
            }
            Entry::Occupied(mut slot) => {
                if slot.get().is_empty() && !record.text.is_empty() {
                    slot.insert(record.text.clone());
                }
            }
        }
    }

    order
        .into_iter()
        .map(|href| {
            let text = texts.remove(&href).unwrap_or_default();
            LinkRecord { text, href }
        })
        .collect()
}
