//! Personal header, hero and about section.

use super::esc;
use crate::data::Personal;
use crate::dom::{Patch, Target};

/// Document title: `"<name> - <title>"`.
pub fn page_title(personal: &Personal) -> String {
    format!("{} - {}", personal.name, personal.title)
}

/// Meta description: `"<name> - <title>. <heroSubtitle>"`.
pub fn page_description(personal: &Personal) -> String {
    format!("{}. {}", page_title(personal), personal.hero_subtitle)
}

pub fn populate(personal: &Personal) -> Vec<Patch> {
    vec![
        Patch::text(Target::tag("title"), page_title(personal)),
        Patch::attr(Target::id("page-description"), "content", page_description(personal)),
        Patch::text(Target::id("nav-name"), &personal.name),
        Patch::text(Target::id("nav-title"), &personal.title),
        Patch::text(Target::id("hero-title"), &personal.hero_title),
        Patch::text(Target::id("hero-subtitle"), &personal.hero_subtitle),
        Patch::attr(Target::id("profile-image"), "alt", &personal.name),
        Patch::append(Target::id("bio-paragraphs"), bio(personal)),
        Patch::append(Target::id("education-list"), education(personal)),
        Patch::append(Target::id("quick-facts"), quick_facts(personal)),
    ]
}

fn bio(personal: &Personal) -> String {
    personal
        .bio
        .iter()
        .map(|paragraph| format!("<p>{}</p>", esc(paragraph)))
        .collect()
}

fn education(personal: &Personal) -> String {
    personal
        .education
        .iter()
        .map(|edu| {
            format!(
                "<li><strong>{}</strong>, {} ({})</li>",
                esc(&edu.degree),
                esc(&edu.institution),
                esc(&edu.year.to_string())
            )
        })
        .collect()
}

fn quick_facts(personal: &Personal) -> String {
    personal
        .quick_facts
        .iter()
        .map(|fact| {
            format!(
                r#"<div class="quick-fact"><span class="quick-fact-label">{}:</span> <span class="quick-fact-value">{}</span></div>"#,
                esc(&fact.label),
                esc(&fact.value.to_string())
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::dom::Op;

    fn personal() -> Personal {
        fixtures::page_data().personal
    }

    fn op_for(patches: &[Patch], target: Target) -> Op {
        patches
            .iter()
            .find(|p| p.target == target)
            .map(|p| p.op.clone())
            .unwrap()
    }

    #[test]
    fn test_title_and_description() {
        let personal = personal();
        assert_eq!(page_title(&personal), "Jane Smith - Associate Professor of Computer Science");
        assert_eq!(
            page_description(&personal),
            "Jane Smith - Associate Professor of Computer Science. I study learning systems & graphs"
        );
    }

    #[test]
    fn test_bio_in_order_and_escaped() {
        let patches = populate(&personal());
        assert_eq!(
            op_for(&patches, Target::id("bio-paragraphs")),
            Op::Append("<p>First paragraph.</p><p>Second &lt;paragraph&gt;.</p>".into())
        );
    }

    #[test]
    fn test_education_format() {
        let patches = populate(&personal());
        assert_eq!(
            op_for(&patches, Target::id("education-list")),
            Op::Append(
                "<li><strong>PhD in Computer Science</strong>, MIT (2015)</li>\
                 <li><strong>BSc</strong>, ETH Zurich (2010)</li>"
                    .into()
            )
        );
    }

    #[test]
    fn test_quick_facts_label_value_pairs() {
        let Op::Append(html) = op_for(&populate(&personal()), Target::id("quick-facts")) else {
            panic!("expected append");
        };
        assert_eq!(html.matches(r#"class="quick-fact""#).count(), 2);
        assert!(html.contains(r#"<span class="quick-fact-label">Students:</span> <span class="quick-fact-value">12</span>"#));
    }

    #[test]
    fn test_empty_personal_renders_nothing_extra() {
        let patches = populate(&Personal::default());
        assert_eq!(op_for(&patches, Target::id("bio-paragraphs")), Op::Append(String::new()));
    }
}
