//! Data types for the four JSON documents.
//!
//! Field names follow the camelCase keys of the JSON files. Every record
//! defaults missing fields, and nested arrays drop entries of the wrong shape
//! (see [`super::lenient`]), so sparse or partly broken documents still render.

use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four loaded collections, immutable for the lifetime of a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageData {
    pub personal: Personal,
    pub publications: Vec<Publication>,
    pub courses: Vec<Course>,
    pub projects: Vec<Project>,
}

// ============================================================================
// Personal
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    #[serde(deserialize_with = "lenient::vec")]
    pub bio: Vec<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient::vec")]
    pub quick_facts: Vec<QuickFact>,
    #[serde(deserialize_with = "lenient::vec")]
    pub research_interests: Vec<ResearchInterest>,
    #[serde(deserialize_with = "lenient::vec")]
    pub supervision: Vec<SupervisionStat>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub contact: Contact,
    #[serde(deserialize_with = "lenient::vec")]
    pub social_links: Vec<SocialLink>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub footer: Footer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: Scalar,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickFact {
    pub label: String,
    pub value: Scalar,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchInterest {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisionStat {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: Scalar,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Footer {
    pub copyright: String,
    pub last_updated: String,
}

/// A value that data authors write either as a number or as a string
/// (`"year": 2015` and `"year": "2015–2019"` both occur).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Scalar {
    /// Integer reading of the value: numbers directly, text when it parses.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Publications
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    #[serde(deserialize_with = "lenient::vec")]
    pub authors: Vec<Author>,
    pub venue: String,
    /// Usually a number; `"2021"` is accepted too.
    pub year: Scalar,
    pub featured: bool,
    #[serde(deserialize_with = "lenient::vec")]
    pub links: Vec<PublicationLink>,
}

/// An author entry: a plain name, or an object that marks the owner explicitly.
///
/// ```json
/// ["J. Smith", {"name": "A. Doe", "highlight": true}]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Entry {
        name: String,
        #[serde(default)]
        highlight: Option<bool>,
    },
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Entry { name, .. } => name,
        }
    }

    /// Whether the author is the site owner.
    ///
    /// An explicit `highlight` flag wins; otherwise the name is matched
    /// against the configured owner substring (empty disables matching).
    pub fn is_owner(&self, owner: &str) -> bool {
        match self {
            Self::Entry {
                highlight: Some(flag),
                ..
            } => *flag,
            _ => !owner.is_empty() && self.name().contains(owner),
        }
    }
}

impl From<&str> for Author {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

// ============================================================================
// Courses
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub course_code: String,
    pub title: String,
    pub level: String,
    pub semester: String,
    pub description: String,
    pub students: Scalar,
    pub schedule: String,
    pub room: String,
    pub status: CourseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseStatus {
    Current,
    Past,
    Other(String),
}

impl CourseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Current => "current",
            Self::Past => "past",
            Self::Other(s) => s,
        }
    }
}

impl Default for CourseStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for CourseStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "current" => Self::Current,
            "past" => Self::Past,
            _ => Self::Other(s),
        }
    }
}

impl From<CourseStatus> for String {
    fn from(status: CourseStatus) -> Self {
        status.as_str().to_owned()
    }
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "lenient::vec")]
    pub technologies: Vec<String>,
    pub status: ProjectStatus,
    pub featured: bool,
    pub funding: Option<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub links: Vec<ProjectLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Active,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Other(s) => s,
        }
    }

    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        if s == "active" { Self::Active } else { Self::Other(s) }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_owned()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub icon: String,
}
