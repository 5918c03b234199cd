//! Fact-gathering JavaScript probes.
//!
//! Each probe is a self-contained IIFE evaluated in the page. Probes
//! collect raw facts only — computed-style strings, box geometry,
//! rendered text, attributes — and make no visibility or filtering
//! decisions; those belong to the engine. Per-element fact gathering is
//! wrapped in try/catch so one malformed or detached element degrades to
//! `style: null` instead of aborting the whole pass.

/// Facts for every `a[href]` element, in document order.
pub const LINK_FACTS: &str = r#"
(() => {
  function facts(el) {
    let style = null;
    try {
      const cs = getComputedStyle(el);
      if (cs) style = { visibility: cs.visibility, display: cs.display };
    } catch (e) {}
    let rect = { width: 0, height: 0 };
    try {
      const r = el.getBoundingClientRect();
      rect = { width: r.width, height: r.height };
    } catch (e) {}
    return { style, rect, text: el.innerText || "" };
  }
  return Array.from(document.querySelectorAll("a[href]")).map(a => ({
    facts: facts(a),
    href: a.getAttribute("href") ?? ""
  }));
})()
"#;

/// Facts for every `<table>`, with raw header and body cell text.
/// `tBodies` covers bare `<tr>` children via the implicit tbody.
pub const TABLE_FACTS: &str = r#"
(() => {
  function facts(el) {
    let style = null;
    try {
      const cs = getComputedStyle(el);
      if (cs) style = { visibility: cs.visibility, display: cs.display };
    } catch (e) {}
    let rect = { width: 0, height: 0 };
    try {
      const r = el.getBoundingClientRect();
      rect = { width: r.width, height: r.height };
    } catch (e) {}
    return { style, rect, text: "" };
  }
  function cellText(tr) {
    return Array.from(tr.cells).map(cell => cell.innerText || "");
  }
  return Array.from(document.querySelectorAll("table")).map(tbl => {
    const headerRows = tbl.tHead ? Array.from(tbl.tHead.rows).map(cellText) : [];
    const bodyRows = [];
    for (const tb of Array.from(tbl.tBodies || [])) {
      for (const tr of Array.from(tb.rows)) bodyRows.push(cellText(tr));
    }
    return { facts: facts(tbl), header_rows: headerRows, body_rows: bodyRows };
  });
})()
"#;

/// Facts for every element in the text-extraction tag allowlist.
/// Keep the selector in sync with `engine::text::TEXT_TAGS`.
pub const TEXT_FACTS: &str = r#"
(() => {
  function facts(el) {
    let style = null;
    try {
      const cs = getComputedStyle(el);
      if (cs) style = { visibility: cs.visibility, display: cs.display };
    } catch (e) {}
    let rect = { width: 0, height: 0 };
    try {
      const r = el.getBoundingClientRect();
      rect = { width: r.width, height: r.height };
    } catch (e) {}
    return { style, rect, text: el.innerText || "" };
  }
  const sels = "main,article,section,h1,h2,h3,h4,h5,h6,p";
  return Array.from(document.querySelectorAll(sels)).map(el => ({ facts: facts(el) }));
})()
"#;

/// Command the document to its current maximum scroll extent.
pub const SCROLL_TO_BOTTOM: &str =
    "(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()";

/// Measure the document's current scroll extent.
pub const SCROLL_EXTENT: &str = "document.body.scrollHeight";

/// Probe for the presence of a CSS selector.
pub fn selector_exists(selector: &str) -> String {
    // JSON-encode the selector so quotes and backslashes survive.
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!("!!document.querySelector({quoted})")
}

/// Click the first match of a CSS selector; returns whether it fired.
pub fn click_selector(selector: &str) -> String {
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(() => {{ const el = document.querySelector({quoted}); if (!el) return false; el.click(); return true; }})()"
    )
}

/// Wrap caller-supplied JavaScript the way the automation layer runs it.
pub fn wrap_custom_js(code: &str) -> String {
    format!("(async () => {{ {code} }})()")
}
