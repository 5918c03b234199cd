//! Page capture orchestration.
//!
//! Drives one live page through its automation phases (wait-for-selector,
//! scroll convergence, clicks, custom JS), then invokes the extraction
//! engine and post-processes links into one serializable report.

use crate::config::CaptureOptions;
use crate::engine::{
    self, run_scroll_convergence, LinkRecord, ScrollConfig, TableRecord,
};
use crate::renderer::{probes, LivePage};
use crate::urls;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Iteration cap when converging with no fixed scroll budget.
const UNBOUNDED_SCROLL_CAP: u32 = 999_999;

/// How often the wait-for-selector poll re-probes the page.
const SELECTOR_POLL_MS: u64 = 250;

/// Everything extracted from one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCapture {
    /// The URL that was requested.
    pub url: String,
    /// The URL the page settled on after redirects.
    pub final_url: String,
    /// Deduplicated visible prose, newline-joined.
    pub text: String,
    /// Cleaned, absolutized, href-deduplicated links.
    pub links: Vec<LinkRecord>,
    /// Reconstructed tables, present only when table extraction is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<TableRecord>>,
}

/// Navigate to `url` and capture it under `options`.
pub async fn capture_page(
    page: &mut dyn LivePage,
    url: &str,
    options: &CaptureOptions,
) -> Result<PageCapture> {
    let nav = page
        .navigate(url, options.goto_timeout_ms)
        .await
        .with_context(|| format!("failed to open {url}"))?;
    info!(url, final_url = %nav.final_url, load_time_ms = nav.load_time_ms, "page loaded");

    if let Some(selector) = &options.wait_selector {
        wait_for_selector(page, selector, options.wait_timeout_ms).await;
    }

    if options.wants_scrolling() {
        let config = ScrollConfig {
            max_iterations: if options.scrolls > 0 {
                options.scrolls
            } else {
                UNBOUNDED_SCROLL_CAP
            },
            wait_ms: options.scroll_wait_ms,
            detect_end: options.scroll_until_end,
        };
        let outcome = run_scroll_convergence(page.as_document(), &config).await?;
        debug!(?outcome, "scroll phase finished");
    }

    for selector in &options.click_selectors {
        click_selector(page, selector, options.post_click_wait_ms).await;
    }

    run_custom_js(page, options).await;

    let text = engine::extract_text(page.as_document()).await?;
    let raw_links = engine::extract_links(page.as_document()).await?;
    let links = urls::clean_links(&raw_links, &nav.final_url);
    let tables = if options.include_tables {
        Some(engine::extract_tables(page.as_document()).await?)
    } else {
        None
    };

    Ok(PageCapture {
        url: url.to_string(),
        final_url: nav.final_url,
        text,
        links,
        tables,
    })
}

/// Poll for a selector until it appears or the timeout elapses. A timeout
/// is tolerated; extraction proceeds with whatever rendered.
async fn wait_for_selector(page: &dyn LivePage, selector: &str, timeout_ms: u64) {
    let probe = probes::selector_exists(selector);
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        match page.execute_js(&probe).await {
            Ok(value) if value.as_bool().unwrap_or(false) => {
                debug!(selector, "wait selector appeared");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(selector, "selector probe failed: {e}");
                return;
            }
        }
        if Instant::now() >= deadline {
            debug!(selector, timeout_ms, "wait selector never appeared");
            return;
        }
        tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
    }
}

/// Click a selector best-effort and give the page time to react.
async fn click_selector(page: &dyn LivePage, selector: &str, post_click_wait_ms: u64) {
    match page.execute_js(&probes::click_selector(selector)).await {
        Ok(value) if value.as_bool().unwrap_or(false) => {
            debug!(selector, "clicked");
            tokio::time::sleep(Duration::from_millis(post_click_wait_ms)).await;
        }
        Ok(_) => debug!(selector, "click selector not found"),
        Err(e) => warn!(selector, "click failed: {e}"),
    }
}

/// Evaluate caller-supplied JavaScript, inline or from a file. Failure is
/// logged, never fatal.
async fn run_custom_js(page: &dyn LivePage, options: &CaptureOptions) {
    let code = if let Some(inline) = &options.eval_js {
        Some(inline.clone())
    } else if let Some(path) = &options.eval_js_file {
        match std::fs::read_to_string(path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                warn!(path, "could not read eval-js file: {e}");
                None
            }
        }
    } else {
        None
    };

    if let Some(code) = code {
        if let Err(e) = page.execute_js(&probes::wrap_custom_js(&code)).await {
            warn!("eval_js failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dom::{
        BoundingRect, DocumentHandle, ElementFacts, LinkNode, StyleFacts, TableNode, TextNode,
    };
    use crate::renderer::{NavigationResult, RenderContext};
    use assert_json_diff::assert_json_include;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn visible_facts(text: &str) -> ElementFacts {
        ElementFacts {
            style: Some(StyleFacts {
                visibility: "visible".to_string(),
                display: "block".to_string(),
            }),
            rect: BoundingRect {
                width: 800.0,
                height: 24.0,
            },
            text: text.to_string(),
        }
    }

    /// Scripted page: fixed node sets, recorded JS evaluations.
    struct ScriptedPage {
        links: Vec<LinkNode>,
        texts: Vec<TextNode>,
        tables: Vec<TableNode>,
        executed: Mutex<Vec<String>>,
        scrolls: Mutex<u32>,
    }

    impl ScriptedPage {
        fn new() -> Self {
            Self {
                links: vec![
                    LinkNode {
                        facts: visible_facts("Docs"),
                        href: "/docs".to_string(),
                    },
                    LinkNode {
                        facts: visible_facts("Top"),
                        href: "#top".to_string(),
                    },
                ],
                texts: vec![
                    TextNode {
                        facts: visible_facts("Welcome"),
                    },
                    TextNode {
                        facts: visible_facts("Welcome"),
                    },
                ],
                tables: vec![TableNode {
                    facts: visible_facts(""),
                    header_rows: vec![vec!["A".to_string(), "B".to_string()]],
                    body_rows: vec![vec!["1".to_string(), "2".to_string()]],
                }],
                executed: Mutex::new(Vec::new()),
                scrolls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl RenderContext for ScriptedPage {
        async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<NavigationResult> {
            Ok(NavigationResult {
                final_url: url.to_string(),
                load_time_ms: 5,
            })
        }
        async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
            self.executed.lock().unwrap().push(script.to_string());
            // Selector probes "find" their target, clicks fire.
            Ok(serde_json::Value::Bool(true))
        }
        async fn get_html(&self) -> Result<String> {
            Ok(String::new())
        }
        async fn get_url(&self) -> Result<String> {
            Ok("https://example.com/".to_string())
        }
        async fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentHandle for ScriptedPage {
        async fn link_nodes(&self) -> Result<Vec<LinkNode>> {
            Ok(self.links.clone())
        }
        async fn table_nodes(&self) -> Result<Vec<TableNode>> {
            Ok(self.tables.clone())
        }
        async fn text_nodes(&self) -> Result<Vec<TextNode>> {
            Ok(self.texts.clone())
        }
        async fn scroll_to_bottom(&self) -> Result<()> {
            *self.scrolls.lock().unwrap() += 1;
            Ok(())
        }
        async fn scroll_extent(&self) -> Result<f64> {
            Ok(1200.0)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_assembles_cleaned_report() {
        let mut page = ScriptedPage::new();
        let options = CaptureOptions {
            include_tables: true,
            ..CaptureOptions::default()
        };

        let capture = capture_page(&mut page, "https://example.com", &options)
            .await
            .unwrap();

        // Text deduplicated, fragment link cleaned away, href absolutized.
        assert_eq!(capture.text, "Welcome");
        assert_eq!(capture.links.len(), 1);
        assert_eq!(capture.links[0].href, "https://example.com/docs");
        assert_json_include!(
            actual: serde_json::to_value(&capture).unwrap(),
            expected: serde_json::json!({
                "url": "https://example.com",
                "final_url": "https://example.com",
                "tables": [{"headers": [["A", "B"]], "rows": [["1", "2"]]}],
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tables_omitted_unless_requested() {
        let mut page = ScriptedPage::new();
        let options = CaptureOptions::default();
        let capture = capture_page(&mut page, "https://example.com", &options)
            .await
            .unwrap();
        assert!(capture.tables.is_none());
        let json = serde_json::to_value(&capture).unwrap();
        assert!(json.get("tables").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_scroll_budget_is_spent() {
        let mut page = ScriptedPage::new();
        let options = CaptureOptions {
            scrolls: 5,
            scroll_wait_ms: 200,
            ..CaptureOptions::default()
        };
        capture_page(&mut page, "https://example.com", &options)
            .await
            .unwrap();
        assert_eq!(*page.scrolls.lock().unwrap(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_convergence_stabilizes() {
        // Constant extent: sentinel comparison plus three stable reads.
        let mut page = ScriptedPage::new();
        let options = CaptureOptions {
            scroll_until_end: true,
            scroll_wait_ms: 100,
            ..CaptureOptions::default()
        };
        capture_page(&mut page, "https://example.com", &options)
            .await
            .unwrap();
        assert_eq!(*page.scrolls.lock().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_automation_probes_run_in_order() {
        let mut page = ScriptedPage::new();
        let options = CaptureOptions {
            wait_selector: Some("#app".to_string()),
            click_selectors: vec!["button.more".to_string()],
            eval_js: Some("document.title = 'x';".to_string()),
            ..CaptureOptions::default()
        };
        capture_page(&mut page, "https://example.com", &options)
            .await
            .unwrap();

        let executed = page.executed.lock().unwrap();
        let wait_pos = executed.iter().position(|s| s.contains("#app")).unwrap();
        let click_pos = executed
            .iter()
            .position(|s| s.contains("button.more"))
            .unwrap();
        let eval_pos = executed
            .iter()
            .position(|s| s.contains("document.title"))
            .unwrap();
        assert!(wait_pos < click_pos && click_pos < eval_pos);
    }
}
