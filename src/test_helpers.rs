//! Shared test utilities for the press test suite.
//!
//! Provides fixture setup, lookup helpers, and in-memory document sets so
//! stage tests don't have to lay out a pages directory by hand.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let documents = Collector::new(AssetVersion::Disabled)
//!     .collect(&tmp.path().join("pages"))
//!     .unwrap();
//!
//! let hello = find_document(&documents, "blog/hello");
//! assert_eq!(hello.metadata.title.as_deref(), Some("Hello"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::assets::AssetVersion;
use crate::collect::{Collector, Document, DocumentSet};
use crate::naming::LogicalPath;
use crate::render::BuildContext;

/// Version token used throughout the tests; renders as `6553f100`.
pub const TEST_VERSION: AssetVersion = AssetVersion::Enabled(1_700_000_000);

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` (a `pages/` and an `assets/` directory) to a temp
/// directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a page source below `dir`, creating parent directories.
pub fn write_source(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Lookup helpers
// =========================================================================

/// Find a document by logical path. Panics if absent.
pub fn find_document<'a>(documents: &'a DocumentSet, path: &str) -> &'a Document {
    documents
        .get(path)
        .unwrap_or_else(|| panic!("document '{path}' not found"))
}

/// Logical paths in collection order.
pub fn logical_paths(documents: &DocumentSet) -> Vec<&str> {
    documents.iter().map(|d| d.path.as_str()).collect()
}

pub fn logical(path: &str) -> LogicalPath {
    let root = Path::new("pages");
    LogicalPath::from_source(root, &root.join(format!("{path}.md"))).unwrap()
}

// =========================================================================
// In-memory builds
// =========================================================================

/// Build context writing below `root`, versioned with [`TEST_VERSION`].
pub fn context(root: &Path) -> BuildContext {
    BuildContext {
        output_root: root.to_path_buf(),
        version: TEST_VERSION,
        site_name: "Test Site".to_string(),
    }
}

/// Parse `(logical path, source)` pairs into a document set, in order.
pub fn document_set(pages: &[(String, String)]) -> DocumentSet {
    let collector = Collector::new(TEST_VERSION);
    let mut documents = DocumentSet::new();
    for (path, source) in pages {
        let document = collector
            .parse_document(logical(path), source.clone())
            .unwrap_or_else(|e| panic!("failed to parse '{path}': {e}"));
        documents.insert(document);
    }
    documents
}
