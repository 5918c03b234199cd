// Copyright 2026 Pagesift Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::Parser;
use pagesift::capture::capture_page;
use pagesift::config::CaptureOptions;
use pagesift::renderer::{chromium::ChromiumRenderer, Renderer};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pagesift",
    about = "Pagesift — extract visible links, tables, and text from a live rendered page",
    version,
    after_help = "Output is a single JSON document on stdout; logs go to stderr."
)]
struct Cli {
    /// URL to capture
    url: String,

    /// Navigation timeout in milliseconds
    #[arg(long, default_value = "30000")]
    goto_timeout_ms: u64,

    /// How long to wait for --wait-selector before giving up
    #[arg(long, default_value = "15000")]
    wait_timeout_ms: u64,

    /// Pause after each clicked selector, in milliseconds
    #[arg(long, default_value = "2000")]
    post_click_wait_ms: u64,

    /// Override the browser user agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Viewport width
    #[arg(long, default_value = "1366")]
    vw: u32,

    /// Viewport height
    #[arg(long, default_value = "900")]
    vh: u32,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Wait for this CSS selector before automation and extraction
    #[arg(long)]
    wait_selector: Option<String>,

    /// Click CSS selector(s) before extraction; repeatable
    #[arg(long = "click-selector")]
    click_selectors: Vec<String>,

    /// Scroll this many times
    #[arg(long, default_value = "0")]
    scrolls: u32,

    /// Wait between scrolls in milliseconds
    #[arg(long, default_value = "1000")]
    scroll_wait_ms: u64,

    /// Keep scrolling until the page height is stable
    #[arg(long)]
    scroll_until_end: bool,

    /// Custom JavaScript (inline) to run on the page
    #[arg(long)]
    eval_js: Option<String>,

    /// Path to a JavaScript file to run on the page
    #[arg(long)]
    eval_js_file: Option<String>,

    /// Include table extraction
    #[arg(long)]
    tables: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose/debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn to_options(&self) -> CaptureOptions {
        CaptureOptions {
            goto_timeout_ms: self.goto_timeout_ms,
            wait_timeout_ms: self.wait_timeout_ms,
            post_click_wait_ms: self.post_click_wait_ms,
            user_agent: self.user_agent.clone(),
            viewport_width: self.vw,
            viewport_height: self.vh,
            headful: self.headful,
            wait_selector: self.wait_selector.clone(),
            click_selectors: self.click_selectors.clone(),
            scrolls: self.scrolls,
            scroll_wait_ms: self.scroll_wait_ms,
            scroll_until_end: self.scroll_until_end,
            eval_js: self.eval_js.clone(),
            eval_js_file: self.eval_js_file.clone(),
            include_tables: self.tables,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "pagesift=debug"
    } else {
        "pagesift=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = cli.to_options();

    let renderer = ChromiumRenderer::launch(&options).await?;
    let mut page = renderer.new_page().await?;

    let result = capture_page(page.as_mut(), &cli.url, &options).await;

    page.close().await.ok();
    renderer.shutdown().await.ok();

    let capture = match result {
        Ok(capture) => capture,
        Err(e) => {
            eprintln!("  Error: {e:#}");
            std::process::exit(1);
        }
    };

    info!(
        links = capture.links.len(),
        text_bytes = capture.text.len(),
        "capture complete"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&capture)?
    } else {
        serde_json::to_string(&capture)?
    };
    println!("{json}");

    Ok(())
}
