//! Pages assembled from many documents at once.
//!
//! | Module | Page | Source documents |
//! |--------|------|------------------|
//! | [`index`] | `blog.html` | every `blog_entry`, grouped by year |
//! | [`resume`] | `resume.html` | every `resume_part`, slotted by `id` |
//!
//! Both are recomputed from the full [`DocumentSet`](crate::collect::DocumentSet)
//! on every build.

pub mod index;
pub mod resume;

pub use index::{blog_index, write_index};
pub use resume::{resume_sections, write_resume};
