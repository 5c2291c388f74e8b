//! Image reference rewriting.
//!
//! Pages embed images by their logical name (`![logo](/assets/logo.png)`),
//! but the copied file carries the build's version token. This stage renames
//! the file name part of every image destination the same way
//! [`copy_assets`](crate::assets::copy_assets) renames the file, so the two
//! always match:
//!
//! ```text
//! /assets/logo.png        →  /assets/logo.6553f100.png
//! /assets/logo.png?v#top  →  /assets/logo.6553f100.png?v#top
//! https://cdn/x.png       →  unchanged (not ours)
//! /assets/photo.jpg       →  unchanged (not a versioned extension)
//! ```
//!
//! Each image node is handled at most once per tree. The tree records the
//! event index of every node already visited, so running the rewriter again
//! (or visiting two images with identical destinations) never stacks tokens.

use crate::assets::{self, AssetVersion};
use crate::markdown::ParseTree;
use pulldown_cmark::{CowStr, Event, Tag};

/// Rewrites image destinations to their versioned file names.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceRewriter {
    version: AssetVersion,
}

impl ReferenceRewriter {
    pub fn new(version: AssetVersion) -> Self {
        Self { version }
    }

    /// Rewrite every not-yet-visited image in `tree`. Returns how many
    /// destinations changed.
    pub fn rewrite(&self, tree: &mut ParseTree) -> usize {
        if !self.version.is_enabled() {
            return 0;
        }

        let mut rewritten = 0;
        for (index, event) in tree.events.iter_mut().enumerate() {
            let Event::Start(Tag::Image { dest_url, .. }) = event else {
                continue;
            };
            if !tree.visited.insert(index) {
                continue;
            }
            if let Some(new_dest) = versioned_destination(dest_url, self.version) {
                *dest_url = CowStr::from(new_dest);
                rewritten += 1;
            }
        }
        rewritten
    }
}

/// The versioned form of a local image destination, or `None` when the
/// destination is left as is.
pub fn versioned_destination(dest: &str, version: AssetVersion) -> Option<String> {
    if is_external(dest) {
        return None;
    }

    let suffix_start = dest.find(['?', '#']).unwrap_or(dest.len());
    let (path, suffix) = dest.split_at(suffix_start);
    let name_start = path.rfind('/').map(|pos| pos + 1).unwrap_or(0);
    let (dir, name) = path.split_at(name_start);

    if name.is_empty() || !assets::is_versioned(name) {
        return None;
    }
    Some(format!(
        "{dir}{}{suffix}",
        assets::asset_file_name(name, version)
    ))
}

fn is_external(dest: &str) -> bool {
    dest.starts_with("//") || dest.starts_with("data:") || dest.contains("://")
}
