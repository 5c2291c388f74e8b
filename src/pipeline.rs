//! The full build: assets, pages, then the aggregate pages.
//!
//! ```text
//! 1. Assets     assets/   →  build/assets/    (versioned copies)
//! 2. Collect    pages/    →  DocumentSet      (parse + validate + rewrite)
//! 3. Render     each document → build/<path>.html
//! 4. Aggregate  DocumentSet → build/blog.html, build/resume.html
//! ```
//!
//! One [`AssetVersion`] is chosen up front and threaded through every
//! stage, so page references and copied file names always agree.

use crate::aggregate::{write_index, write_resume};
use crate::assets::{AssetError, AssetVersion, copy_assets};
use crate::collect::{CollectError, Collector, DocumentSet};
use crate::config::BuildConfig;
use crate::naming::LogicalPath;
use crate::render::{BuildContext, RenderError, RenderOutcome, SkipReason, render_document};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What a build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_root: PathBuf,
    pub assets: Vec<PathBuf>,
    pub pages: Vec<(LogicalPath, PathBuf)>,
    pub skipped: Vec<(LogicalPath, SkipReason)>,
    pub index: PathBuf,
    pub resume: PathBuf,
}

/// Build the site, versioning assets with the current time.
pub fn build(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    let version = if config.asset_versioning {
        AssetVersion::now()
    } else {
        AssetVersion::Disabled
    };
    build_with_version(config, version)
}

/// Build the site with a fixed asset version.
pub fn build_with_version(
    config: &BuildConfig,
    version: AssetVersion,
) -> Result<BuildReport, BuildError> {
    let ctx = BuildContext {
        output_root: config.build_dir.clone(),
        version,
        site_name: config.site_name.clone(),
    };

    tracing::info!(assets_dir = %config.assets_dir.display(), ?version, "copying assets");
    let assets = copy_assets(&config.assets_dir, &ctx.output_root, version)?;
    tracing::info!(count = assets.len(), "copied assets");

    let documents = Collector::new(version).collect(&config.pages_dir)?;

    tracing::info!(build_dir = %ctx.output_root.display(), "rendering pages");
    let mut pages = Vec::new();
    let mut skipped = Vec::new();
    for document in &documents {
        match render_document(document, &ctx)? {
            RenderOutcome::Written(path) => pages.push((document.path.clone(), path)),
            RenderOutcome::Skipped(reason) => skipped.push((document.path.clone(), reason)),
        }
    }

    let index = write_index(&documents, &ctx)?;
    let resume = write_resume(&documents, &ctx)?;

    tracing::info!(
        pages = pages.len(),
        skipped = skipped.len(),
        "build complete"
    );
    Ok(BuildReport {
        output_root: ctx.output_root,
        assets,
        pages,
        skipped,
        index,
        resume,
    })
}

/// Collect and validate every page without writing anything.
pub fn check(config: &BuildConfig) -> Result<DocumentSet, BuildError> {
    let documents = Collector::new(AssetVersion::Disabled).collect(&config.pages_dir)?;
    Ok(documents)
}
