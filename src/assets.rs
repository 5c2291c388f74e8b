//! Cache-busted asset naming and copying.
//!
//! Every build stamps style sheets, scripts and PNG images with the build
//! time so browsers treat each build's assets as new resources:
//!
//! ```text
//! assets/style.css   →  build/assets/style.6553f100.css
//! assets/app.js      →  build/assets/app.6553f100.js
//! assets/photo.png   →  build/assets/photo.6553f100.png
//! assets/resume.pdf  →  build/assets/resume.pdf        (not versioned)
//! ```
//!
//! The token is the build time in seconds since the Unix epoch, written as
//! eight lowercase hex digits. All consumers (the asset copier, the page
//! headers and the [`rewrite`](crate::rewrite) stage) receive the same
//! [`AssetVersion`], so a page's links and the copied file always agree.

use crate::metadata::Metadata;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions that take part in versioning. Everything else is copied verbatim.
pub const VERSIONED_EXTENSIONS: &[&str] = &[".css", ".js", ".png"];

/// Directory under the build root where assets land; also the URL prefix.
pub const ASSETS_OUTPUT_DIR: &str = "assets";

const BASE_STYLESHEET: &str = "style.css";
const BASE_SCRIPT: &str = "app.js";
const HIGHLIGHT_STYLESHEET: &str = "prism.css";
const HIGHLIGHT_SCRIPT: &str = "prism.js";

/// Front-matter flag that pulls in the syntax highlighting assets.
pub const HIGHLIGHT_FLAG: &str = "require_prism";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("unable to walk assets directory {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("unable to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

/// The version token shared by everything in one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetVersion {
    /// Versioning turned off: names pass through unchanged.
    Disabled,
    /// Build time in seconds since the Unix epoch.
    Enabled(u64),
}

impl AssetVersion {
    /// Version token for a build starting now.
    pub fn now() -> Self {
        let seconds = chrono::Utc::now().timestamp();
        Self::Enabled(u64::try_from(seconds).unwrap_or(0))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// Split a file name into `(base, extension)`; the extension keeps its dot.
///
/// Mirrors the usual "last dot" rule, except a leading dot (`.gitignore`)
/// is part of the base, not an extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(pos) => name.split_at(pos),
    }
}

/// Insert the version token between base name and extension.
///
/// Returns the new name and the extension (with its leading dot). With
/// versioning disabled only the extension extraction happens.
///
/// ```
/// use press::assets::{versioned_name, AssetVersion};
///
/// let (name, ext) = versioned_name("style.css", AssetVersion::Enabled(0x0a1b2c3d));
/// assert_eq!(name, "style.0a1b2c3d.css");
/// assert_eq!(ext, ".css");
/// ```
pub fn versioned_name(name: &str, version: AssetVersion) -> (String, String) {
    let (base, ext) = split_extension(name);
    let new_name = match version {
        AssetVersion::Enabled(seconds) => format!("{base}.{seconds:08x}{ext}"),
        AssetVersion::Disabled => name.to_string(),
    };
    (new_name, ext.to_string())
}

/// Whether a file name has one of the [`VERSIONED_EXTENSIONS`].
pub fn is_versioned(name: &str) -> bool {
    let (_, ext) = split_extension(name);
    VERSIONED_EXTENSIONS.contains(&ext)
}

/// Name an asset file gets in the build output.
pub fn asset_file_name(name: &str, version: AssetVersion) -> String {
    if is_versioned(name) {
        versioned_name(name, version).0
    } else {
        name.to_string()
    }
}

/// URL under which a page references an asset.
pub fn asset_url(versioned: &str) -> String {
    format!("/{ASSETS_OUTPUT_DIR}/{versioned}")
}

/// Style sheets and scripts linked from one page header, already versioned.
#[derive(Debug, Clone, PartialEq)]
pub struct PageAssets {
    version: AssetVersion,
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl PageAssets {
    pub fn new(version: AssetVersion) -> Self {
        Self {
            version,
            css: Vec::new(),
            js: Vec::new(),
        }
    }

    /// The base style sheet and script every page links.
    pub fn standard(version: AssetVersion) -> Self {
        let mut assets = Self::new(version);
        assets.add(BASE_STYLESHEET);
        assets.add(BASE_SCRIPT);
        assets
    }

    /// Standard assets plus whatever the page's front matter asks for.
    pub fn for_metadata(version: AssetVersion, metadata: &Metadata) -> Self {
        let mut assets = Self::standard(version);
        if metadata.extra.flag(HIGHLIGHT_FLAG) {
            assets.add(HIGHLIGHT_STYLESHEET);
            assets.add(HIGHLIGHT_SCRIPT);
        }
        assets
    }

    /// Add an asset by logical name.
    ///
    /// # Panics
    ///
    /// The set of page asset kinds is fixed: anything other than a `.css`
    /// or `.js` name is a bug in the caller.
    pub fn add(&mut self, name: &str) {
        let (versioned, ext) = versioned_name(name, self.version);
        match ext.as_str() {
            ".css" => self.css.push(versioned),
            ".js" => self.js.push(versioned),
            other => panic!("invalid page asset extension {other:?} for {name:?}"),
        }
    }
}

/// Copy every file under `assets_root` into `<output_root>/assets/`,
/// renaming versioned ones.
///
/// Returns the output paths, in walk order.
pub fn copy_assets(
    assets_root: &Path,
    output_root: &Path,
    version: AssetVersion,
) -> Result<Vec<PathBuf>, AssetError> {
    let target_root = output_root.join(ASSETS_OUTPUT_DIR);
    let mut copied = Vec::new();

    for entry in WalkDir::new(assets_root).sort_by_file_name() {
        let entry = entry.map_err(|source| AssetError::Walk {
            path: assets_root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(assets_root)
            .unwrap_or(entry.path());
        let file_name = entry.file_name().to_string_lossy();
        let output_path = match relative.parent() {
            Some(parent) => target_root
                .join(parent)
                .join(asset_file_name(&file_name, version)),
            None => target_root.join(asset_file_name(&file_name, version)),
        };

        copy_file(entry.path(), &output_path).map_err(|source| AssetError::Copy {
            from: entry.path().to_path_buf(),
            to: output_path.clone(),
            source,
        })?;
        tracing::debug!(from = %entry.path().display(), to = %output_path.display(), "copied asset");
        copied.push(output_path);
    }

    Ok(copied)
}

fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(dir) = to.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut input = fs::File::open(from)?;
    let mut output = fs::File::create(to)?;
    io::copy(&mut input, &mut output)?;
    output.sync_all()
}
