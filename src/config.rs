//! Capture configuration.

use serde::{Deserialize, Serialize};

/// Everything configurable about one page capture: browser shape,
/// navigation timeouts, page automation, and extraction toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Navigation timeout in milliseconds.
    pub goto_timeout_ms: u64,
    /// How long to poll for `wait_selector` before giving up.
    pub wait_timeout_ms: u64,
    /// Pause after each click selector fires.
    pub post_click_wait_ms: u64,
    /// Override the browser user agent.
    pub user_agent: Option<String>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Show the browser window instead of running headless.
    pub headful: bool,
    /// Wait for this CSS selector to appear before automation runs.
    pub wait_selector: Option<String>,
    /// CSS selectors to click, in order, before extraction.
    pub click_selectors: Vec<String>,
    /// Scroll this many times; 0 means no fixed budget.
    pub scrolls: u32,
    /// Wait between scrolls in milliseconds.
    pub scroll_wait_ms: u64,
    /// Keep scrolling until the page height is stable.
    pub scroll_until_end: bool,
    /// Custom JavaScript to evaluate on the page before extraction.
    pub eval_js: Option<String>,
    /// Path to a JavaScript file to evaluate instead of `eval_js`.
    pub eval_js_file: Option<String>,
    /// Include table extraction in the capture.
    pub include_tables: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            goto_timeout_ms: 30_000,
            wait_timeout_ms: 15_000,
            post_click_wait_ms: 2_000,
            user_agent: None,
            viewport_width: 1366,
            viewport_height: 900,
            headful: false,
            wait_selector: None,
            click_selectors: Vec::new(),
            scrolls: 0,
            scroll_wait_ms: 1000,
            scroll_until_end: false,
            eval_js: None,
            eval_js_file: None,
            include_tables: false,
        }
    }
}

impl CaptureOptions {
    /// Whether any scroll phase is configured at all.
    pub fn wants_scrolling(&self) -> bool {
        self.scrolls > 0 || self.scroll_until_end
    }
}
