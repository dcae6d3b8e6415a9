//! # Artemisia Site
//!
//! Website, static-site prerenderer, and product catalog for Artemisia
//! Pharma. One page set, two delivery modes:
//!
//! ```text
//! build    pages → rewrite →  dist/        (static tree)
//!                          →  docs/        (publish mirror + 404 redirect)
//! serve    pages → HTTP      (live routes + contact-form email relay)
//! ```
//!
//! Product listings are not compiled in: each category page reads its rows
//! from an `.xlsx` workbook under `data/` at render time, so non-developers
//! own the catalog content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Category metadata and spreadsheet-backed product loading |
//! | [`pages`] | The page registry — routes, output paths, render bindings |
//! | [`templates`] | Maud HTML templates shared by both delivery modes |
//! | [`rewrite`] | Base-path link rewriting for static hosting |
//! | [`prerender`] | The build pipeline: clear, copy, render, publish |
//! | [`server`] | Axum live server, including the POST /contact relay |
//! | [`mailer`] | SMTP relay for contact submissions |
//! | [`config`] | `site.toml` + environment configuration |
//! | [`datagen`] | Starter workbook scaffolding |
//!
//! # Design Decisions
//!
//! ## Maud Over Runtime Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error, interpolation is auto-escaped, and there is no
//! template directory to ship or get out of sync between the server and the
//! prerenderer.
//!
//! ## Root-Relative Templates, Textual Rewriting
//!
//! Templates emit root-relative links so the live server serves them as-is.
//! The static build rewrites those links textually for the deployment base
//! path. This only works because the templates are controlled and emit a
//! small, fixed set of attribute strings — [`rewrite`] documents the
//! contract and its limits.
//!
//! ## Lossy Catalog, Fatal Build
//!
//! The catalog loader never fails: a missing or broken workbook renders as
//! an empty product list with a logged warning, because a live page beats a
//! dead one. The build pipeline is the opposite: any error aborts the whole
//! build, because a half-built static site must not be published.

pub mod catalog;
pub mod config;
pub mod datagen;
pub mod mailer;
pub mod pages;
pub mod prerender;
pub mod rewrite;
pub mod server;
pub mod templates;
