//! Project cards.

use super::esc;
use crate::data::Project;
use crate::dom::{Patch, Target};
use std::cmp::Reverse;

pub fn populate(projects: &[Project]) -> Vec<Patch> {
    let cards: String = sorted(projects).into_iter().map(project_card).collect();
    vec![Patch::append(Target::id("projects-grid"), cards)]
}

/// Featured projects first, then active ones; otherwise input order.
pub fn sorted(projects: &[Project]) -> Vec<&Project> {
    let mut sorted: Vec<_> = projects.iter().collect();
    sorted.sort_by_key(|p| (Reverse(p.featured), Reverse(p.status.is_active())));
    sorted
}

fn project_card(project: &Project) -> String {
    let class = if project.featured {
        "project-card featured"
    } else {
        "project-card"
    };
    let status = esc(project.status.as_str());

    let tags: String = project
        .technologies
        .iter()
        .map(|tech| format!(r#"<span class="tech-tag">{}</span>"#, esc(tech)))
        .collect();

    let funding = project
        .funding
        .as_deref()
        .filter(|funding| !funding.is_empty())
        .map(|funding| format!(r#"<div class="project-funding">Funding: {}</div>"#, esc(funding)))
        .unwrap_or_default();

    let links: String = project
        .links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{}" class="project-link" target="_blank"><i class="{}"></i> {}</a>"#,
                esc(&link.url),
                esc(&link.icon),
                esc(&link.kind)
            )
        })
        .collect();

    format!(
        concat!(
            r#"<div class="{}">"#,
            r#"<div class="project-header"><h3>{}</h3><div class="project-status {}">{}</div></div>"#,
            "<p>{}</p>",
            r#"<div class="project-tech">{}</div>"#,
            "{}",
            r#"<div class="project-links">{}</div>"#,
            "</div>"
        ),
        class,
        esc(&project.title),
        status,
        status,
        esc(&project.description),
        tags,
        funding,
        links
    )
}
