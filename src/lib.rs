// Copyright 2026 Pagesift Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pagesift library — extract visible links, tables, and prose from live
//! rendered pages, with scroll-driven lazy-load convergence.
//!
//! The [`engine`] module holds the pure extraction and convergence logic;
//! [`renderer`] provides the headless Chromium backend; [`capture`] ties
//! the two together into one page report.

pub mod capture;
pub mod config;
pub mod engine;
pub mod renderer;
pub mod urls;
