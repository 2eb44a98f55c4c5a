//! Site data: the four JSON documents and their loader.
//!
//! | Document            | Type               |
//! |---------------------|--------------------|
//! | `personal.json`     | [`Personal`]       |
//! | `publications.json` | `Vec<Publication>` |
//! | `courses.json`      | `Vec<Course>`      |
//! | `projects.json`     | `Vec<Project>`     |
//!
//! The loaded documents are bundled into one immutable [`PageData`] that is
//! passed by reference to every populator and to the search engine.

mod error;
mod lenient;
mod loader;
mod types;

#[cfg(test)]
pub mod fixtures;

pub use error::{LoadError, SourceKind};
pub use loader::DataLoader;
pub use types::{
    Author, Course, CourseStatus, PageData, Personal, Project, ProjectStatus, Publication, Scalar,
};
