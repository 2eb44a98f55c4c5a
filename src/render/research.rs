//! Research interests and publications.

use super::{RenderOptions, esc};
use crate::data::{PageData, Publication};
use crate::dom::{Patch, Target};
use std::cmp::Reverse;

pub fn populate(data: &PageData, options: &RenderOptions) -> Vec<Patch> {
    let interests: String = data
        .personal
        .research_interests
        .iter()
        .map(|interest| {
            format!(
                r#"<div class="interest-card"><i class="{}"></i><h4>{}</h4><p>{}</p></div>"#,
                esc(&interest.icon),
                esc(&interest.title),
                esc(&interest.description)
            )
        })
        .collect();

    let publications: String = sorted(&data.publications)
        .into_iter()
        .map(|publication| publication_item(publication, &options.owner))
        .collect();

    vec![
        Patch::append(Target::id("research-interests-grid"), interests),
        Patch::append(Target::id("publications-list"), publications),
    ]
}

/// Publications by year, newest first. Equal years keep their input order.
pub fn sorted(publications: &[Publication]) -> Vec<&Publication> {
    let mut sorted: Vec<_> = publications.iter().collect();
    sorted.sort_by_key(|p| Reverse(p.year.as_int()));
    sorted
}

/// Authors joined by `", "`, with the owner's entries in `<strong>`.
pub fn format_authors(publication: &Publication, owner: &str) -> String {
    publication
        .authors
        .iter()
        .map(|author| {
            if author.is_owner(owner) {
                format!("<strong>{}</strong>", esc(author.name()))
            } else {
                esc(author.name()).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn publication_item(publication: &Publication, owner: &str) -> String {
    let class = if publication.featured {
        "publication-item featured"
    } else {
        "publication-item"
    };
    let links: String = publication
        .links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{}" class="pub-link" target="_blank">{}</a>"#,
                esc(&link.url),
                esc(&link.kind)
            )
        })
        .collect();

    format!(
        concat!(
            r#"<div class="{}"><div class="publication-content">"#,
            r#"<span class="pub-title"><strong>{}</strong></span>. "#,
            r#"<span class="authors">{}</span>. "#,
            r#"<span class="venue"><em>{}</em>, {}</span>. "#,
            r#"<span class="publication-links-inline">{}</span>"#,
            "</div></div>"
        ),
        class,
        esc(&publication.title),
        format_authors(publication, owner),
        esc(&publication.venue),
        esc(&publication.year.to_string()),
        links
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Author, Scalar, fixtures};
    use crate::dom::Op;

    fn publication(title: &str, year: i32) -> Publication {
        Publication {
            title: title.into(),
            authors: vec![],
            venue: String::new(),
            year: Scalar::Int(year.into()),
            featured: false,
            links: vec![],
        }
    }

    fn appended(patches: &[Patch], id: &str) -> String {
        match patches.iter().find(|p| p.target == Target::id(id)).map(|p| &p.op) {
            Some(Op::Append(html)) => html.clone(),
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_sorted_by_year_desc_stable() {
        let pubs = vec![
            publication("a", 2020),
            publication("b", 2022),
            publication("c", 2020),
            publication("d", 2022),
            publication("e", 2021),
        ];
        let titles: Vec<_> = sorted(&pubs).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["b", "d", "e", "a", "c"]);

        let years: Vec<_> = sorted(&pubs).iter().map(|p| p.year.as_int()).collect();
        assert!(years.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_text_years_sort_with_numbers() {
        let mut text = publication("text", 0);
        text.year = Scalar::Text("2021".into());
        let mut range = publication("range", 0);
        range.year = Scalar::Text("in press".into());
        let pubs = vec![range, publication("old", 2019), text, publication("new", 2023)];

        let titles: Vec<_> = sorted(&pubs).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["new", "text", "old", "range"]);
    }

    #[test]
    fn test_owner_emphasis() {
        let mut p = publication("x", 2020);
        p.authors = vec![Author::from("J. Smith"), Author::from("A. Lee")];
        assert_eq!(format_authors(&p, "Smith"), "<strong>J. Smith</strong>, A. Lee");
        assert_eq!(format_authors(&p, "Lee"), "J. Smith, <strong>A. Lee</strong>");
        assert_eq!(format_authors(&p, ""), "J. Smith, A. Lee");
    }

    #[test]
    fn test_publications_rendered_once_each_in_order() {
        let data = fixtures::page_data();
        let html = appended(&populate(&data, &RenderOptions::default()), "publications-list");

        assert_eq!(html.matches(r#"class="publication-item"#).count(), data.publications.len());
        let robust = html.find("Robust Optimization").unwrap();
        let deep = html.find("Deep Learning for Graphs").unwrap();
        let sparse = html.find("Sparse Models").unwrap();
        assert!(robust < deep && deep < sparse);
    }

    #[test]
    fn test_publication_item_markup() {
        let data = fixtures::page_data();
        let html = publication_item(&data.publications[0], "Smith");

        assert!(html.starts_with(r#"<div class="publication-item featured">"#));
        assert!(html.contains("<strong>J. Smith</strong>, A. Lee"));
        assert!(html.contains(r#"<span class="venue"><em>NeurIPS</em>, 2022</span>"#));
        assert!(html.contains(
            r#"<a href="https://example.com/dlg.pdf" class="pub-link" target="_blank">PDF</a><a href="https://github.com/jsmith/dlg" class="pub-link" target="_blank">Code</a>"#
        ));
    }

    #[test]
    fn test_interest_cards_in_stored_order() {
        let data = fixtures::page_data();
        let html = appended(&populate(&data, &RenderOptions::default()), "research-interests-grid");

        assert_eq!(html.matches(r#"class="interest-card""#).count(), 2);
        assert!(html.find("Machine Learning").unwrap() < html.find("Compilers").unwrap());
        assert!(html.contains(r#"<i class="fas fa-brain"></i>"#));
    }
}
