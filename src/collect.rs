//! Page discovery and parsing.
//!
//! Walks the pages directory, parses every `.md` file and validates its
//! front matter into a [`DocumentSet`]:
//!
//! ```text
//! pages/                       logical path   format
//! ├── about.md                 about          standard
//! ├── blog/
//! │   ├── hello.md             blog/hello     blog_entry
//! │   └── draft.txt            (ignored, not markdown)
//! └── resume/
//!     └── skills.md            resume/skills  resume_part
//! ```
//!
//! Entries are visited in file name order, so the order of the set is
//! stable across builds. Any unreadable file or invalid front matter fails
//! the whole collection: a build never runs on a partial set.

use crate::assets::AssetVersion;
use crate::markdown::{MarkdownParser, ParseTree};
use crate::metadata::{Format, FrontMatter, FrontMatterError, Metadata, MetadataError};
use crate::naming::LogicalPath;
use crate::rewrite::ReferenceRewriter;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extension of page sources.
pub const PAGE_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("unable to walk pages directory {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("unable to read file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("unable to get relative path of {path}")]
    Path { path: PathBuf },
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("invalid metadata in {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: MetadataError,
    },
}

/// One parsed page.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: LogicalPath,
    /// File contents as read from disk.
    pub source: String,
    pub tree: ParseTree,
    pub metadata: Metadata,
}

/// Pages in walk order, unique by logical path.
#[derive(Debug, Default)]
pub struct DocumentSet {
    documents: Vec<Document>,
    positions: HashMap<LogicalPath, usize>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document. A document with the same logical path replaces the
    /// earlier one in place and the earlier one is returned.
    pub fn insert(&mut self, document: Document) -> Option<Document> {
        match self.positions.get(&document.path) {
            Some(&pos) => Some(std::mem::replace(&mut self.documents[pos], document)),
            None => {
                self.positions
                    .insert(document.path.clone(), self.documents.len());
                self.documents.push(document);
                None
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.path.as_str() == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Documents of one format, in set order.
    pub fn with_format<'a>(&'a self, format: &'a Format) -> impl Iterator<Item = &'a Document> {
        self.documents
            .iter()
            .filter(move |d| &d.metadata.format == format)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<'a> IntoIterator for &'a DocumentSet {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Turns page sources into [`Document`]s.
pub struct Collector {
    parser: MarkdownParser,
    rewriter: ReferenceRewriter,
}

impl Collector {
    pub fn new(version: AssetVersion) -> Self {
        Self {
            parser: MarkdownParser::new(),
            rewriter: ReferenceRewriter::new(version),
        }
    }

    /// Collect every page under `root`.
    pub fn collect(&self, root: &Path) -> Result<DocumentSet, CollectError> {
        tracing::info!(root = %root.display(), "collecting pages");

        let mut documents = DocumentSet::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| CollectError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_dir() || !is_page_source(entry.path()) {
                continue;
            }

            let document = self.read_document(root, entry.path())?;
            tracing::debug!(path = %document.path, format = ?document.metadata.format, "collected page");
            if let Some(replaced) = documents.insert(document) {
                tracing::debug!(path = %replaced.path, "page replaced by a later file");
            }
        }

        tracing::info!(count = documents.len(), "collected pages");
        Ok(documents)
    }

    fn read_document(&self, root: &Path, file: &Path) -> Result<Document, CollectError> {
        let source = fs::read_to_string(file).map_err(|source| CollectError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let path = LogicalPath::from_source(root, file).ok_or_else(|| CollectError::Path {
            path: file.to_path_buf(),
        })?;
        self.parse_document(path, source)
            .map_err(|err| err.with_path(file))
    }

    /// Parse one page from its source text.
    pub fn parse_document(
        &self,
        path: LogicalPath,
        source: String,
    ) -> Result<Document, DocumentError> {
        let parsed = self.parser.parse(&source, &self.rewriter);

        let front_matter = match parsed.front_matter.as_deref() {
            Some(yaml) => FrontMatter::parse(yaml).map_err(DocumentError::FrontMatter)?,
            None => FrontMatter::default(),
        };
        let metadata = Metadata::from_front_matter(front_matter).map_err(DocumentError::Metadata)?;

        Ok(Document {
            path,
            source,
            tree: parsed.tree,
            metadata,
        })
    }
}

/// Failure to turn source text into a [`Document`], before the file path
/// is attached.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error(transparent)]
    FrontMatter(FrontMatterError),
    #[error(transparent)]
    Metadata(MetadataError),
}

impl DocumentError {
    fn with_path(self, file: &Path) -> CollectError {
        let path = file.to_path_buf();
        match self {
            Self::FrontMatter(source) => CollectError::FrontMatter { path, source },
            Self::Metadata(source) => CollectError::Metadata { path, source },
        }
    }
}

fn is_page_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PAGE_EXTENSION)
}
