//! HTML layouts.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Layouts are composable: a format-specific content block (blog entry,
//! blog index, resume) is built first and handed to a page shell
//! ([`page`] or [`resume_page`]) together with the page header and its
//! resolved asset list.

use crate::aggregate::index::IndexYear;
use crate::assets::{PageAssets, asset_url};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};

/// What goes into `<head>` besides assets.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
    pub description: Option<String>,
}

impl Header {
    pub fn new(title: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            title: title.into(),
            description: description.map(String::from),
        }
    }
}

fn head(header: &Header, assets: &PageAssets) -> Markup {
    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (header.title) }
            @if let Some(description) = &header.description {
                meta name="description" content=(description);
            }
            @for css in &assets.css {
                link rel="stylesheet" href=(asset_url(css));
            }
            @for js in &assets.js {
                script src=(asset_url(js)) defer {}
            }
        }
    }
}

/// Site navigation shown on every regular page.
fn site_header(site_name: &str) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (site_name) }
            nav.site-nav {
                a href="/blog" { "Blog" }
                a href="/resume" { "Resume" }
            }
        }
    }
}

/// The generic page shell.
pub fn page(header: &Header, assets: &PageAssets, site_name: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (head(header, assets))
            body {
                (site_header(site_name))
                main { (content) }
            }
        }
    }
}

/// A blog post: title, date, table of contents and body.
pub fn blog_content(
    title: Option<&str>,
    date: Option<NaiveDate>,
    toc: Option<Markup>,
    body: Markup,
) -> Markup {
    html! {
        article.blog-entry {
            header.blog-entry-header {
                @if let Some(title) = title {
                    h1 { (title) }
                }
                @if let Some(date) = date {
                    time datetime=(date.format("%Y-%m-%d").to_string()) {
                        (date.format("%B %-d, %Y").to_string())
                    }
                }
            }
            @if let Some(toc) = toc {
                nav.toc {
                    h2 { "Contents" }
                    (toc)
                }
            }
            div.blog-entry-body { (body) }
        }
    }
}

/// The list of blog posts grouped by year.
pub fn blog_index(years: &[IndexYear]) -> Markup {
    html! {
        section.blog-index {
            h1 { "Blog" }
            @for year in years {
                section.blog-year {
                    h2 { (year.year) }
                    ul {
                        @for entry in &year.entries {
                            li {
                                time datetime=(entry.date.format("%Y-%m-%d").to_string()) {
                                    (entry.date.format("%b %d").to_string())
                                }
                                " "
                                a href=(entry.url) { (entry.title) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Rendered resume fragments, one per slot.
#[derive(Debug, Default)]
pub struct ResumeContent {
    pub skills: Option<Markup>,
    pub work_experience: Vec<Markup>,
    pub side_projects: Option<Markup>,
}

/// The composite resume body. Empty slots render as empty sections.
pub fn resume(owner: &str, content: ResumeContent) -> Markup {
    html! {
        div.resume {
            div.resume-header {
                h1 { (owner) }
            }
            div.resume-skills {
                @if let Some(skills) = content.skills {
                    (skills)
                }
            }
            div.resume-experience {
                h2 { "Work experience" }
                @for experience in content.work_experience {
                    div.work-experience { (experience) }
                }
            }
            div.resume-side-projects {
                @if let Some(side_projects) = content.side_projects {
                    (side_projects)
                }
            }
        }
    }
}

/// Page shell for the resume: no site navigation, print friendly.
pub fn resume_page(header: &Header, assets: &PageAssets, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (head(header, assets))
            body.resume-page {
                main { (content) }
            }
        }
    }
}
