//! Per-page rendering, dispatched on the page's [`Format`].
//!
//! | Format | Output |
//! |--------|--------|
//! | `standard` | body inside the site layout |
//! | `blog_entry` | table of contents + body inside the blog layout, then the site layout |
//! | `resume_part` | nothing; assembled by [`aggregate::resume`](crate::aggregate::resume) |
//! | anything else | nothing; logged and skipped |
//!
//! Each rendered page lands at `<output>/<logical path>.html`.

use crate::assets::{AssetVersion, PageAssets};
use crate::collect::Document;
use crate::layout::{self, Header};
use crate::markdown;
use crate::metadata::Format;
use crate::naming::LogicalPath;
use crate::toc::{self, TocError};
use maud::{Markup, PreEscaped};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unable to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("unable to generate table of contents for page {page}: {source}")]
    Toc { page: LogicalPath, source: TocError },
}

/// Everything a renderer needs to know about the current build.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub output_root: PathBuf,
    pub version: AssetVersion,
    pub site_name: String,
}

/// Why a page produced no output.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Resume parts only appear inside the resume page.
    ResumePart,
    /// `format` is absent or not one this build knows.
    UnknownFormat(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

/// Render one page to its output file.
pub fn render_document(
    document: &Document,
    ctx: &BuildContext,
) -> Result<RenderOutcome, RenderError> {
    let metadata = &document.metadata;
    let body = || PreEscaped(markdown::render(document.tree.events()));

    let content = match &metadata.format {
        Format::Standard => body(),
        Format::BlogEntry => {
            let toc = toc::inspect(&document.tree).map_err(|source| RenderError::Toc {
                page: document.path.clone(),
                source,
            })?;
            let toc = (!toc.is_empty()).then(|| PreEscaped(markdown::render(&toc.to_events())));
            layout::blog_content(metadata.title.as_deref(), metadata.date, toc, body())
        }
        Format::ResumePart => return Ok(RenderOutcome::Skipped(SkipReason::ResumePart)),
        Format::Unrecognized(_) | Format::Missing => {
            tracing::debug!(path = %document.path, format = ?metadata.format.tag(), "skipping page, unknown format");
            return Ok(RenderOutcome::Skipped(SkipReason::UnknownFormat(
                metadata.format.tag().map(String::from),
            )));
        }
    };

    let header = Header::new(
        metadata.title.as_deref().unwrap_or(&ctx.site_name),
        metadata.description.as_deref(),
    );
    let assets = PageAssets::for_metadata(ctx.version, metadata);
    let page = layout::page(&header, &assets, &ctx.site_name, content);

    let output_path = document.path.output_path(&ctx.output_root);
    write_page(&output_path, page)?;
    tracing::info!(path = %document.path, output_path = %output_path.display(), "generating file");

    Ok(RenderOutcome::Written(output_path))
}

/// Write a finished page, creating parent directories. Existing files are
/// overwritten.
pub fn write_page(path: &Path, page: Markup) -> Result<(), RenderError> {
    let write = || -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(page.into_string().as_bytes())?;
        file.sync_all()
    };
    write().map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::Collector;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn document(path: &str, source: &str) -> Document {
        Collector::new(AssetVersion::Enabled(1_700_000_000))
            .parse_document(logical(path), source.to_string())
            .unwrap()
    }

    #[test]
    fn standard_page() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        let doc = document(
            "about",
            "---\ntitle: About\ndescription: Who\nformat: standard\n---\nHello **there**\n",
        );

        let outcome = render_document(&doc, &ctx).unwrap();
        let path = tmp.path().join("about.html");
        assert_eq!(outcome, RenderOutcome::Written(path.clone()));

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("<title>About</title>"));
        assert!(html.contains(r#"content="Who""#));
        assert!(html.contains("<strong>there</strong>"));
        assert!(html.contains("/assets/style.6553f100.css"));
        assert!(!html.contains("prism"));
    }

    #[test]
    fn blog_entry_gets_toc() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        let doc = document(
            "blog/a",
            "---\ntitle: Hello\ndate: 2024 January 05\nformat: blog_entry\n---\n# Hi\n\n## Details\n",
        );

        render_document(&doc, &ctx).unwrap();
        let html = std::fs::read_to_string(tmp.path().join("blog/a.html")).unwrap();
        assert!(html.contains(r#"<nav class="toc">"#));
        assert!(html.contains(r##"<a href="#hi">Hi</a>"##));
        assert!(html.contains(r##"<a href="#details">Details</a>"##));
        assert!(html.contains(r#"<h1 id="hi">Hi</h1>"#));
        assert!(html.contains(r#"datetime="2024-01-05""#));
    }

    #[test]
    fn highlight_flag_adds_assets() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        let doc = document(
            "code",
            "---\nformat: standard\nrequire_prism: true\n---\n```rust\nfn main() {}\n```\n",
        );

        render_document(&doc, &ctx).unwrap();
        let html = std::fs::read_to_string(tmp.path().join("code.html")).unwrap();
        assert!(html.contains("/assets/prism.6553f100.css"));
        assert!(html.contains("/assets/prism.6553f100.js"));
    }

    #[test]
    fn untitled_page_uses_site_name() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        let doc = document("x", "---\nformat: standard\n---\nx\n");

        render_document(&doc, &ctx).unwrap();
        let html = std::fs::read_to_string(tmp.path().join("x.html")).unwrap();
        assert!(html.contains("<title>Test Site</title>"));
    }

    #[test]
    fn resume_part_is_not_rendered() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        let doc = document("resume/skills", "---\nformat: resume_part\nid: skills\n---\nx\n");

        let outcome = render_document(&doc, &ctx).unwrap();
        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::ResumePart));
        assert!(!tmp.path().join("resume/skills.html").exists());
    }

    #[test]
    fn unknown_and_missing_formats_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());

        let unknown = document("wip", "---\nformat: draft\n---\nx\n");
        assert_eq!(
            render_document(&unknown, &ctx).unwrap(),
            RenderOutcome::Skipped(SkipReason::UnknownFormat(Some("draft".into())))
        );

        let missing = document("plain", "# Plain\n");
        assert_eq!(
            render_document(&missing, &ctx).unwrap(),
            RenderOutcome::Skipped(SkipReason::UnknownFormat(None))
        );

        assert!(!tmp.path().join("wip.html").exists());
        assert!(!tmp.path().join("plain.html").exists());
    }

    #[test]
    fn broken_toc_fails_the_page() {
        use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag};

        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        let mut doc = document(
            "blog/broken",
            "---\ndate: 2024 January 05\nformat: blog_entry\n---\n",
        );
        doc.tree = crate::markdown::ParseTree::new(vec![Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            id: Some(CowStr::Borrowed("x")),
            classes: vec![],
            attrs: vec![],
        })]);

        let err = render_document(&doc, &ctx).unwrap_err();
        assert!(matches!(err, RenderError::Toc { .. }));
        assert!(!tmp.path().join("blog/broken.html").exists());
    }

    #[test]
    fn rendering_twice_overwrites() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        render_document(&document("p", "---\nformat: standard\n---\nfirst\n"), &ctx).unwrap();
        render_document(&document("p", "---\nformat: standard\n---\nsecond\n"), &ctx).unwrap();

        let html = std::fs::read_to_string(tmp.path().join("p.html")).unwrap();
        assert!(html.contains("second"));
        assert!(!html.contains("first"));
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let tmp = TempDir::new().unwrap();
        // A file where the output directory should be
        std::fs::write(tmp.path().join("blog"), "").unwrap();
        let ctx = context(tmp.path());
        let doc = document("blog/a", "---\nformat: standard\n---\nx\n");

        assert!(matches!(
            render_document(&doc, &ctx),
            Err(RenderError::Io { .. })
        ));
    }
}
