//! The resume page, assembled from `resume_part` documents.
//!
//! Each part names its slot with an `id` key:
//!
//! | `id` | Slot | Repeats |
//! |------|------|---------|
//! | `skills` | skills section | last one wins |
//! | `work_experience` | work experience list | every part, in document order |
//! | `side_projects` | side projects section | last one wins |
//!
//! Parts without an `id`, or with any other `id`, are ignored.

use crate::assets::PageAssets;
use crate::collect::{Document, DocumentSet};
use crate::layout::{self, Header, ResumeContent};
use crate::markdown;
use crate::metadata::Format;
use crate::render::{BuildContext, RenderError, write_page};
use maud::{Markup, PreEscaped};
use std::path::PathBuf;

/// File name of the resume under the output root.
pub const RESUME_FILE: &str = "resume.html";

/// Where a resume part goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSlot {
    Skills,
    WorkExperience,
    SideProjects,
}

impl ResumeSlot {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "skills" => Some(Self::Skills),
            "work_experience" => Some(Self::WorkExperience),
            "side_projects" => Some(Self::SideProjects),
            _ => None,
        }
    }

    /// The slot a document is tagged for, from its `id` front matter key.
    pub fn of(document: &Document) -> Option<Self> {
        document.metadata.extra.text("id").and_then(Self::from_id)
    }
}

/// Resume parts sorted into their slots.
#[derive(Debug, Default)]
pub struct ResumeSections<'a> {
    pub skills: Option<&'a Document>,
    pub work_experience: Vec<&'a Document>,
    pub side_projects: Option<&'a Document>,
}

pub fn resume_sections(documents: &DocumentSet) -> ResumeSections<'_> {
    let mut sections = ResumeSections::default();
    for document in documents.with_format(&Format::ResumePart) {
        match ResumeSlot::of(document) {
            Some(ResumeSlot::Skills) => sections.skills = Some(document),
            Some(ResumeSlot::WorkExperience) => sections.work_experience.push(document),
            Some(ResumeSlot::SideProjects) => sections.side_projects = Some(document),
            None => {
                tracing::debug!(path = %document.path, "ignoring resume part without a known id");
            }
        }
    }
    sections
}

fn fragment(document: &Document) -> Markup {
    PreEscaped(markdown::render(document.tree.events()))
}

/// Render the resume page to `<output>/resume.html`.
pub fn write_resume(documents: &DocumentSet, ctx: &BuildContext) -> Result<PathBuf, RenderError> {
    let sections = resume_sections(documents);
    let content = ResumeContent {
        skills: sections.skills.map(fragment),
        work_experience: sections.work_experience.into_iter().map(fragment).collect(),
        side_projects: sections.side_projects.map(fragment),
    };

    let header = Header::new(format!("{} - Resume", ctx.site_name), None);
    let assets = PageAssets::standard(ctx.version);
    let page = layout::resume_page(&header, &assets, layout::resume(&ctx.site_name, content));

    let output_path = ctx.output_root.join(RESUME_FILE);
    write_page(&output_path, page)?;
    tracing::info!(output_path = %output_path.display(), "generating resume");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn part(path: &str, id: Option<&str>, body: &str) -> (String, String) {
        let id_line = id.map(|id| format!("id: {id}\n")).unwrap_or_default();
        (
            path.to_string(),
            format!("---\nformat: resume_part\n{id_line}---\n{body}\n"),
        )
    }

    fn paths(docs: &[&Document]) -> Vec<String> {
        docs.iter().map(|d| d.path.to_string()).collect()
    }

    #[test]
    fn single_slots_keep_the_last_part() {
        let documents = document_set(&[
            part("r/skills-1", Some("skills"), "old skills"),
            part("r/skills-2", Some("skills"), "new skills"),
            part("r/side-1", Some("side_projects"), "old side"),
            part("r/side-2", Some("side_projects"), "new side"),
        ]);

        let sections = resume_sections(&documents);
        assert_eq!(sections.skills.unwrap().path.as_str(), "r/skills-2");
        assert_eq!(sections.side_projects.unwrap().path.as_str(), "r/side-2");
    }

    #[test]
    fn work_experience_keeps_every_part_in_order() {
        let documents = document_set(&[
            part("r/b", Some("work_experience"), "b"),
            part("r/skills", Some("skills"), "s"),
            part("r/a", Some("work_experience"), "a"),
            part("r/c", Some("work_experience"), "c"),
        ]);

        let sections = resume_sections(&documents);
        assert_eq!(paths(&sections.work_experience), vec!["r/b", "r/a", "r/c"]);
    }

    #[test]
    fn unknown_or_missing_ids_are_ignored() {
        let documents = document_set(&[
            part("r/none", None, "x"),
            part("r/other", Some("hobbies"), "x"),
        ]);

        let sections = resume_sections(&documents);
        assert!(sections.skills.is_none());
        assert!(sections.work_experience.is_empty());
        assert!(sections.side_projects.is_none());
    }

    #[test]
    fn non_string_id_is_ignored() {
        let documents = document_set(&[(
            "r/num".to_string(),
            "---\nformat: resume_part\nid: 3\n---\nx\n".to_string(),
        )]);
        assert!(ResumeSlot::of(documents.iter().next().unwrap()).is_none());
    }

    #[test]
    fn other_formats_are_not_resume_parts() {
        let documents = document_set(&[(
            "skills".to_string(),
            "---\nformat: standard\nid: skills\n---\nx\n".to_string(),
        )]);
        assert!(resume_sections(&documents).skills.is_none());
    }

    #[test]
    fn writes_resume_page() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        let documents = document_set(&[
            part("r/skills-1", Some("skills"), "Old **skills**"),
            part("r/skills-2", Some("skills"), "New **skills**"),
            part("r/job-1", Some("work_experience"), "Job one"),
            part("r/job-2", Some("work_experience"), "Job two"),
        ]);

        let path = write_resume(&documents, &ctx).unwrap();
        assert_eq!(path, tmp.path().join(RESUME_FILE));

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("<title>Test Site - Resume</title>"));
        assert!(html.contains("New <strong>skills</strong>"));
        assert!(!html.contains("Old <strong>skills</strong>"));
        let one = html.find("Job one").unwrap();
        let two = html.find("Job two").unwrap();
        assert!(one < two);
        assert!(html.contains(r#"<div class="resume-side-projects"></div>"#));
    }
}
