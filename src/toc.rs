//! Table of contents for blog entries.
//!
//! [`inspect`] walks the headings of a parse tree and nests them by level;
//! [`Toc::to_events`] turns the result back into markdown events (a nested
//! bullet list of `#id` links) so it renders through the same HTML writer as
//! the page body.

use crate::markdown::ParseTree;
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TocError {
    #[error("heading at event {0} is never closed")]
    Unclosed(usize),
    #[error("heading {0:?} has no id")]
    MissingId(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocItem {
    pub level: u32,
    pub id: String,
    /// Inline content of the heading, links and images unwrapped.
    pub title: Vec<Event<'static>>,
    pub children: Vec<TocItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toc {
    pub items: Vec<TocItem>,
}

impl Toc {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The ToC as a nested list, ready for [`render`](crate::markdown::render).
    pub fn to_events(&self) -> Vec<Event<'static>> {
        let mut events = Vec::new();
        if !self.items.is_empty() {
            push_list(&self.items, &mut events);
        }
        events
    }
}

/// Build the heading tree of `tree`.
pub fn inspect(tree: &ParseTree) -> Result<Toc, TocError> {
    let events = tree.events();
    let mut toc = Toc::default();
    let mut index = 0;

    while index < events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[index] else {
            index += 1;
            continue;
        };

        let end = events[index + 1..]
            .iter()
            .position(|e| matches!(e, Event::End(TagEnd::Heading(_))))
            .map(|offset| index + 1 + offset)
            .ok_or(TocError::Unclosed(index))?;
        let inner = &events[index + 1..end];

        let Some(id) = id else {
            return Err(TocError::MissingId(crate::markdown::heading_text(inner)));
        };

        let item = TocItem {
            level: *level as u32,
            id: id.to_string(),
            title: inner.iter().filter(|e| is_title_event(e)).cloned().collect(),
            children: Vec::new(),
        };
        insert(&mut toc.items, item);
        index = end + 1;
    }

    Ok(toc)
}

/// A heading deeper than the last sibling nests under it.
fn insert(siblings: &mut Vec<TocItem>, item: TocItem) {
    match siblings.last_mut() {
        Some(last) if item.level > last.level => insert(&mut last.children, item),
        _ => siblings.push(item),
    }
}

// ToC entries are links themselves, so nested links and images are unwrapped
fn is_title_event(event: &Event<'_>) -> bool {
    !matches!(
        event,
        Event::Start(Tag::Link { .. } | Tag::Image { .. }) | Event::End(TagEnd::Link | TagEnd::Image)
    )
}

fn push_list(items: &[TocItem], events: &mut Vec<Event<'static>>) {
    events.push(Event::Start(Tag::List(None)));
    for item in items {
        events.push(Event::Start(Tag::Item));
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Inline,
            dest_url: CowStr::from(format!("#{}", item.id)),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.extend(item.title.iter().cloned());
        events.push(Event::End(TagEnd::Link));
        if !item.children.is_empty() {
            push_list(&item.children, events);
        }
        events.push(Event::End(TagEnd::Item));
    }
    events.push(Event::End(TagEnd::List(false)));
}
