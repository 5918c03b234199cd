//! Scroll convergence loop — drive lazy loading until the page stops growing.
//!
//! Each iteration scrolls the document to its maximum extent, then yields
//! for a configurable window so the page's own lazy-load work can run.
//! With end detection enabled, the loop watches the scroll extent and
//! stops once it has stayed unchanged for three consecutive iterations.

use crate::engine::dom::DocumentHandle;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Consecutive no-growth measurements taken as stabilization.
pub const STABLE_ITERATIONS: u32 = 3;

/// Configuration for one convergence run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Upper bound on scroll-wait cycles. Must be positive.
    pub max_iterations: u32,
    /// Cooperative wait after each scroll command, in milliseconds.
    pub wait_ms: u64,
    /// Measure the extent each iteration and stop early once stable.
    /// When false the loop always spends the full iteration budget.
    pub detect_end: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            wait_ms: 1000,
            detect_end: false,
        }
    }
}

/// Which terminal state the loop reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollOutcome {
    /// The extent held still for [`STABLE_ITERATIONS`] measurements.
    Stabilized,
    /// The iteration budget ran out first.
    Exhausted,
}

/// Run the convergence loop against one live document.
///
/// The previous extent starts at 0.0, a sentinel no real page matches, so
/// the first measurement never counts toward stability. Seeding with the
/// pre-loop extent instead would let an already-stable page terminate one
/// iteration early; the sentinel initialization is load-bearing.
pub async fn run_scroll_convergence(
    doc: &dyn DocumentHandle,
    config: &ScrollConfig,
) -> Result<ScrollOutcome> {
    let mut previous = 0.0_f64;
    let mut stable = 0u32;

    for iteration in 0..config.max_iterations {
        doc.scroll_to_bottom().await?;
        tokio::time::sleep(Duration::from_millis(config.wait_ms)).await;

        if config.detect_end {
            let extent = doc.scroll_extent().await?;
            if extent == previous {
                stable += 1;
                if stable >= STABLE_ITERATIONS {
                    debug!(
                        iterations = iteration + 1,
                        extent, "scroll extent stabilized"
                    );
                    return Ok(ScrollOutcome::Stabilized);
                }
            } else {
                stable = 0;
            }
            previous = extent;
        }
    }

    debug!(
        iterations = config.max_iterations,
        "scroll budget exhausted"
    );
    Ok(ScrollOutcome::Exhausted)
}
