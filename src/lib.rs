//! # Press
//!
//! A static site builder for a personal site: markdown pages with YAML front
//! matter become HTML pages, a blog index and a resume.
//!
//! # Architecture: One-Pass Pipeline
//!
//! ```text
//! 1. Assets     assets/  →  build/assets/   (cache-busted copies)
//! 2. Collect    pages/   →  DocumentSet     (parse, validate, rewrite references)
//! 3. Render     each page by its `format`   →  build/<path>.html
//! 4. Aggregate  all pages                   →  build/blog.html, build/resume.html
//! ```
//!
//! The document set is built once and only read afterwards: every renderer
//! and aggregator sees the same parsed trees and the same metadata.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Runs the stages in order and reports what was written |
//! | [`assets`] | Asset version token, versioned names, per-page asset lists, copying |
//! | [`collect`] | Walks the pages directory into a [`collect::DocumentSet`] |
//! | [`metadata`] | Front matter values and validated page metadata |
//! | [`naming`] | Logical page paths and their output files and URLs |
//! | [`markdown`] | Markdown parsing into an owned event tree, HTML rendering, heading ids |
//! | [`rewrite`] | Points image references at versioned asset names |
//! | [`toc`] | Table of contents from a page's headings |
//! | [`render`] | Per-page output, dispatched on the page format |
//! | [`layout`] | Maud page layouts |
//! | [`aggregate`] | The blog index and the resume page |
//! | [`config`] | Layered `press.toml` + command-line configuration |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Page Format Drives Everything
//!
//! A page's `format` key decides how it is rendered and which aggregate pages
//! pick it up. Formats this build does not know are skipped, not rejected, so
//! drafts can live next to published pages with `format: draft`.
//!
//! ## One Version Token Per Build
//!
//! Assets are renamed with the build time (`style.6553f100.css`). The token is
//! chosen once and passed to every stage; nothing reads the clock twice, so
//! page links and copied files can't disagree.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time and all interpolation is escaped.

pub mod aggregate;
pub mod assets;
pub mod collect;
pub mod config;
pub mod layout;
pub mod markdown;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod rewrite;
pub mod toc;

#[cfg(test)]
pub(crate) mod test_helpers;
