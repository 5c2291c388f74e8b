//! The blog index: every blog entry, newest first, grouped by year.

use crate::assets::PageAssets;
use crate::collect::DocumentSet;
use crate::layout::{self, Header};
use crate::metadata::Format;
use crate::render::{BuildContext, RenderError, write_page};
use chrono::{Datelike, NaiveDate};
use std::path::PathBuf;

/// File name of the index under the output root.
pub const INDEX_FILE: &str = "blog.html";

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Site-absolute link, e.g. `/blog/hello`.
    pub url: String,
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexYear {
    pub year: i32,
    pub entries: Vec<IndexEntry>,
}

/// Group blog entries by year.
///
/// Years are in descending order; entries within a year are newest first,
/// and entries sharing a date keep their document order.
pub fn blog_index(documents: &DocumentSet) -> Vec<IndexYear> {
    let mut entries: Vec<IndexEntry> = documents
        .with_format(&Format::BlogEntry)
        .filter_map(|doc| {
            let date = doc.metadata.date?;
            Some(IndexEntry {
                url: doc.path.url(),
                title: doc
                    .metadata
                    .title
                    .clone()
                    .unwrap_or_else(|| doc.path.to_string()),
                date,
            })
        })
        .collect();

    // Stable: equal dates keep document order
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let mut years: Vec<IndexYear> = Vec::new();
    for entry in entries {
        match years.last_mut() {
            Some(group) if group.year == entry.date.year() => group.entries.push(entry),
            _ => years.push(IndexYear {
                year: entry.date.year(),
                entries: vec![entry],
            }),
        }
    }
    years
}

/// Render the index page to `<output>/blog.html`.
pub fn write_index(documents: &DocumentSet, ctx: &BuildContext) -> Result<PathBuf, RenderError> {
    let years = blog_index(documents);
    let header = Header::new(format!("{} - Blog", ctx.site_name), None);
    let assets = PageAssets::standard(ctx.version);
    let page = layout::page(&header, &assets, &ctx.site_name, layout::blog_index(&years));

    let output_path = ctx.output_root.join(INDEX_FILE);
    write_page(&output_path, page)?;
    tracing::info!(output_path = %output_path.display(), "generating blog index");
    Ok(output_path)
}
