//! Markdown parsing and HTML rendering on top of `pulldown-cmark`.
//!
//! The parse tree is the owned event stream produced by `pulldown-cmark`.
//! Parsing does three things besides tokenizing:
//!
//! - lifts the leading YAML metadata block out of the stream (the front
//!   matter side channel),
//! - gives every heading an id (`# Hello World` → `hello-world`, duplicates
//!   get `-1`, `-2`, ...; an explicit `{#id}` attribute wins),
//! - runs the [`ReferenceRewriter`] over image destinations.
//!
//! [`render`] turns any slice of events back into HTML, which is how both
//! page bodies and derived trees like the table of contents are serialized.

use crate::rewrite::ReferenceRewriter;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use std::collections::{HashMap, HashSet};

/// A parsed document body.
#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    pub(crate) events: Vec<Event<'static>>,
    /// Indices of image events the rewriter already handled.
    pub(crate) visited: HashSet<usize>,
}

impl ParseTree {
    pub fn new(events: Vec<Event<'static>>) -> Self {
        Self {
            events,
            visited: HashSet::new(),
        }
    }

    pub fn events(&self) -> &[Event<'static>] {
        &self.events
    }

    /// Destinations of every image in document order.
    pub fn image_destinations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Start(Tag::Image { dest_url, .. }) => Some(dest_url.as_ref()),
                _ => None,
            })
            .collect()
    }
}

/// Output of [`MarkdownParser::parse`].
#[derive(Debug)]
pub struct ParsedMarkdown {
    pub tree: ParseTree,
    /// Raw YAML of the front matter block, if the document has one.
    pub front_matter: Option<String>,
}

/// Markdown parser with the extensions the site uses.
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

        Self { options }
    }

    pub fn parse(&self, source: &str, rewriter: &ReferenceRewriter) -> ParsedMarkdown {
        let mut front_matter: Option<String> = None;
        // Text of the metadata block being read, if any
        let mut block: Option<String> = None;
        let mut events = Vec::new();

        for event in Parser::new_ext(source, self.options) {
            match event {
                Event::Start(Tag::MetadataBlock(_)) => block = Some(String::new()),
                Event::End(TagEnd::MetadataBlock(_)) => {
                    // Only the first block is front matter; later ones are dropped
                    if let Some(text) = block.take()
                        && front_matter.is_none()
                    {
                        front_matter = Some(text);
                    }
                }
                Event::Text(text) if block.is_some() => {
                    if let Some(buffer) = block.as_mut() {
                        buffer.push_str(&text);
                    }
                }
                other if block.is_none() => events.push(other.into_static()),
                _ => {}
            }
        }

        assign_heading_ids(&mut events);

        let mut tree = ParseTree::new(events);
        rewriter.rewrite(&mut tree);

        ParsedMarkdown { tree, front_matter }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Render events to HTML.
pub fn render(events: &[Event<'static>]) -> String {
    let mut output = String::new();
    html::push_html(&mut output, events.iter().cloned());
    output
}

/// Concatenated text of the heading whose start event precedes `events`.
pub(crate) fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Heading id slug: lowercase alphanumerics, whitespace and dashes become `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "heading".to_string()
    } else {
        slug.to_string()
    }
}

fn assign_heading_ids(events: &mut [Event<'static>]) {
    let mut used: HashMap<String, usize> = HashMap::new();
    for event in events.iter() {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            used.insert(id.to_string(), 0);
        }
    }

    for index in 0..events.len() {
        let needs_id = matches!(&events[index], Event::Start(Tag::Heading { id: None, .. }));
        if !needs_id {
            continue;
        }
        let base = slugify(&heading_text(&events[index + 1..]));
        let id = unique_id(base, &mut used);
        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[index] {
            *slot = Some(CowStr::from(id));
        }
    }
}

fn unique_id(base: String, used: &mut HashMap<String, usize>) -> String {
    if !used.contains_key(&base) {
        used.insert(base.clone(), 0);
        return base;
    }
    let mut n = used.get(&base).copied().unwrap_or(0);
    loop {
        n += 1;
        let candidate = format!("{base}-{n}");
        if !used.contains_key(&candidate) {
            used.insert(base, n);
            used.insert(candidate.clone(), 0);
            return candidate;
        }
    }
}
