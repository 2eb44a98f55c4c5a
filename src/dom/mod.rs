//! Document model: an HTML template plus the patches applied to it.
//!
//! Populators never touch markup directly. They return [`Patch`]es that name a
//! [`Target`] and an [`Op`]; the [`Document`] adapter keeps the patches whose
//! target exists and drops the rest, so a template that lacks, say, a
//! `#courses-grid` simply renders without that sub-section.
//!
//! # Targets
//!
//! | Target            | Matches                                  |
//! |-------------------|------------------------------------------|
//! | `Id("bio")`       | the element with `id="bio"`              |
//! | `Class("navbar")` | every element whose class list has it    |
//! | `Tag("title")`    | every `<title>` element                  |
//! | `Nth("card", 2)`  | the third element carrying class `card`  |

mod document;

pub use document::Document;

/// Which elements a patch applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Id(String),
    Class(String),
    Tag(String),
    /// The n-th element (document order, zero-based) with the class.
    Nth(String, usize),
}

impl Target {
    pub fn id(id: &str) -> Self {
        Self::Id(id.to_owned())
    }

    pub fn class(class: &str) -> Self {
        Self::Class(class.to_owned())
    }

    pub fn tag(tag: &str) -> Self {
        Self::Tag(tag.to_ascii_lowercase())
    }

    pub fn nth(class: &str, index: usize) -> Self {
        Self::Nth(class.to_owned(), index)
    }
}

/// What a patch does to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Replace the children with escaped text.
    Text(String),
    /// Replace the children with markup.
    Html(String),
    /// Append markup after the existing children.
    Append(String),
    /// Set an attribute (value is escaped on output).
    Attr(String, String),
    AddClass(String),
    RemoveClass(String),
    /// Set one inline style property.
    Style(String, String),
}

/// A single view-model instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub target: Target,
    pub op: Op,
}

impl Patch {
    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Self { target, op: Op::Text(text.into()) }
    }

    pub fn html(target: Target, html: impl Into<String>) -> Self {
        Self { target, op: Op::Html(html.into()) }
    }

    pub fn append(target: Target, html: impl Into<String>) -> Self {
        Self { target, op: Op::Append(html.into()) }
    }

    pub fn attr(target: Target, name: &str, value: impl Into<String>) -> Self {
        Self { target, op: Op::Attr(name.to_owned(), value.into()) }
    }

    pub fn add_class(target: Target, class: &str) -> Self {
        Self { target, op: Op::AddClass(class.to_owned()) }
    }

    pub fn remove_class(target: Target, class: &str) -> Self {
        Self { target, op: Op::RemoveClass(class.to_owned()) }
    }

    pub fn style(target: Target, property: &str, value: impl Into<String>) -> Self {
        Self { target, op: Op::Style(property.to_owned(), value.into()) }
    }
}
