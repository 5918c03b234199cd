//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the `Renderer` and `RenderContext` traits that abstract over
//! the browser engine (currently Chromium via chromiumoxide). A live page
//! exposes both the render-context surface (navigation, raw JS) and the
//! engine's [`DocumentHandle`](crate::engine::dom::DocumentHandle) fact
//! surface; [`LivePage`] bundles the two for the capture layer.

pub mod chromium;
pub mod probes;

use crate::engine::dom::DocumentHandle;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of navigating to a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that can open pages.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a new page (tab).
    async fn new_page(&self) -> Result<Box<dyn LivePage>>;
    /// Shut down the browser engine.
    async fn shutdown(&self) -> Result<()>;
    /// Number of currently open pages.
    fn active_pages(&self) -> usize;
}

/// A single browser page for navigation and scripting.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL with a timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;
    /// Execute JavaScript in the page context and return the result.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;
    /// Get the full page HTML.
    async fn get_html(&self) -> Result<String>;
    /// Get the current URL.
    async fn get_url(&self) -> Result<String>;
    /// Close this page.
    async fn close(&mut self) -> Result<()>;
}

/// A page that can both be driven (navigate, script) and observed by the
/// extraction engine (element facts, scroll state).
pub trait LivePage: RenderContext + DocumentHandle {
    /// View the page as a bare document handle for the engine.
    fn as_document(&self) -> &dyn DocumentHandle;
}

impl<T: RenderContext + DocumentHandle> LivePage for T {
    fn as_document(&self) -> &dyn DocumentHandle {
        self
    }
}
