//! CLI output formatting for builds and checks.
//!
//! Output is **page-centric**: each line leads with the page's logical path,
//! with the output file or skip reason as secondary context. Paths are shown
//! relative to the build directory so the listing reads as a site map.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Pages
//!     about → about.html
//!     blog/hello → blog/hello.html
//!
//! Skipped
//!     drafts/wip (unknown format "draft")
//!     resume/skills (resume part)
//!
//! Aggregates
//!     blog.html
//!     resume.html
//!
//! Generated 2 pages, 6 assets (2 skipped)
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 about (standard)
//! 002 blog/hello (blog_entry, 2024-01-05)
//! 003 notes (no format)
//!
//! 3 pages are valid
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::collect::DocumentSet;
use crate::pipeline::BuildReport;
use crate::render::SkipReason;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Show `path` relative to `root` when possible.
fn relative<'a>(path: &'a Path, root: &Path) -> std::borrow::Cow<'a, str> {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy()
}

fn skip_reason(reason: &SkipReason) -> String {
    match reason {
        SkipReason::ResumePart => "resume part".to_string(),
        SkipReason::UnknownFormat(Some(tag)) => format!("unknown format \"{tag}\""),
        SkipReason::UnknownFormat(None) => "no format".to_string(),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let root = report.output_root.as_path();
    let mut lines = Vec::new();

    if !report.pages.is_empty() {
        lines.push("Pages".to_string());
        for (path, output) in &report.pages {
            lines.push(format!("    {} \u{2192} {}", path, relative(output, root)));
        }
        lines.push(String::new());
    }

    if !report.skipped.is_empty() {
        lines.push("Skipped".to_string());
        for (path, reason) in &report.skipped {
            lines.push(format!("    {} ({})", path, skip_reason(reason)));
        }
        lines.push(String::new());
    }

    lines.push("Aggregates".to_string());
    lines.push(format!("    {}", relative(&report.index, root)));
    lines.push(format!("    {}", relative(&report.resume, root)));
    lines.push(String::new());

    lines.push(format!(
        "Generated {}, {} ({} skipped)",
        plural(report.pages.len(), "page"),
        plural(report.assets.len(), "asset"),
        report.skipped.len()
    ));

    lines
}

/// Print build output to stdout.
pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check(documents: &DocumentSet) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, document) in documents.iter().enumerate() {
        let format = document.metadata.format.tag().unwrap_or("no format");
        let detail = match document.metadata.date {
            Some(date) => format!("{format}, {}", date.format("%Y-%m-%d")),
            None => format.to_string(),
        };
        lines.push(format!("{} {} ({})", format_index(i + 1), document.path, detail));
    }

    if !documents.is_empty() {
        lines.push(String::new());
    }
    let verb = if documents.len() == 1 { "is" } else { "are" };
    lines.push(format!("{} {verb} valid", plural(documents.len(), "page")));

    lines
}

/// Print check output to stdout.
pub fn print_check(documents: &DocumentSet) {
    for line in format_check(documents) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
