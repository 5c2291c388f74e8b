//! Logical page paths.
//!
//! A page is identified by where it sits under the pages root, minus its
//! extension. The same identifier gives the output file and the URL:
//!
//! ```text
//! pages/blog/a.md   →  logical "blog/a"
//!                   →  output  build/blog/a.html
//!                   →  url     /blog/a
//! ```
//!
//! Components are always joined with `/` so identifiers and URLs look the
//! same on every platform.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Extension of every rendered page.
pub const OUTPUT_EXTENSION: &str = "html";

/// A page identifier: relative path without extension, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Derive the logical path of `file` relative to `root`.
    ///
    /// Returns `None` when `file` is not under `root`.
    pub fn from_source(root: &Path, file: &Path) -> Option<Self> {
        let relative = file.strip_prefix(root).ok()?;
        let stripped = relative.with_extension("");
        Self::from_relative(&stripped)
    }

    /// Recover the logical path from a rendered file under `output_root`.
    pub fn from_output(output_root: &Path, file: &Path) -> Option<Self> {
        let relative = file.strip_prefix(output_root).ok()?;
        if relative.extension()? != OUTPUT_EXTENSION {
            return None;
        }
        Self::from_relative(&relative.with_extension(""))
    }

    fn from_relative(relative: &Path) -> Option<Self> {
        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if parts.is_empty() {
            return None;
        }
        Some(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Where the rendered page is written.
    pub fn output_path(&self, output_root: &Path) -> PathBuf {
        let mut path = output_root.to_path_buf();
        for part in self.0.split('/') {
            path.push(part);
        }
        let file_name = format!(
            "{}.{OUTPUT_EXTENSION}",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
        path.set_file_name(file_name);
        path
    }

    /// Site-absolute link to the page, always starting with `/`.
    pub fn url(&self) -> String {
        format!("/{}", self.0)
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
