//! Current courses and supervision statistics.

use super::esc;
use crate::data::{Course, CourseStatus, PageData};
use crate::dom::{Patch, Target};

pub fn populate(data: &PageData) -> Vec<Patch> {
    let courses: String = current(&data.courses).into_iter().map(course_card).collect();

    let stats: String = data
        .personal
        .supervision
        .iter()
        .map(|stat| {
            format!(
                r#"<div class="stat-card"><div class="stat-number">{}</div><div class="stat-label">{}</div></div>"#,
                esc(&stat.count.to_string()),
                esc(&stat.kind)
            )
        })
        .collect();

    vec![
        Patch::append(Target::id("courses-grid"), courses),
        Patch::append(Target::id("supervision-stats"), stats),
    ]
}

/// Courses with status `current`, in stored order.
pub fn current(courses: &[Course]) -> Vec<&Course> {
    courses
        .iter()
        .filter(|course| course.status == CourseStatus::Current)
        .collect()
}

fn course_card(course: &Course) -> String {
    format!(
        concat!(
            r#"<div class="course-card {}">"#,
            r#"<div class="course-header"><div><h4>{}: {}</h4><div class="course-level">{}</div></div></div>"#,
            r#"<p class="semester">{}</p>"#,
            "<p>{}</p>",
            r#"<div class="course-info">"#,
            r#"<span><i class="fas fa-users"></i> {} students</span>"#,
            r#"<span><i class="fas fa-clock"></i> {}</span>"#,
            r#"<span><i class="fas fa-map-marker-alt"></i> {}</span>"#,
            "</div></div>"
        ),
        esc(course.status.as_str()),
        esc(&course.course_code),
        esc(&course.title),
        esc(&course.level),
        esc(&course.semester),
        esc(&course.description),
        esc(&course.students.to_string()),
        esc(&course.schedule),
        esc(&course.room)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::dom::Op;

    fn appended(patches: &[Patch], id: &str) -> String {
        match patches.iter().find(|p| p.target == Target::id(id)).map(|p| &p.op) {
            Some(Op::Append(html)) => html.clone(),
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_only_current_courses() {
        let data = fixtures::page_data();
        let codes: Vec<_> = current(&data.courses)
            .iter()
            .map(|c| c.course_code.as_str())
            .collect();
        assert_eq!(codes, ["CS101", "CS420"]);

        let html = appended(&populate(&data), "courses-grid");
        assert_eq!(html.matches(r#"class="course-card"#).count(), 2);
        assert!(!html.contains("CS550"));
    }

    #[test]
    fn test_course_card_fields() {
        let data = fixtures::page_data();
        let html = course_card(&data.courses[2]);

        assert!(html.starts_with(r#"<div class="course-card current">"#));
        assert!(html.contains("<h4>CS420: Compiler Construction</h4>"));
        assert!(html.contains(r#"<div class="course-level">Undergraduate</div>"#));
        assert!(html.contains(r#"<p class="semester">Fall 2024</p>"#));
        assert!(html.contains("60 students"));
        assert!(html.contains("Thu 09:00"));
        assert!(html.contains("C-3"));
    }

    #[test]
    fn test_supervision_stats_in_order() {
        let html = appended(&populate(&fixtures::page_data()), "supervision-stats");
        assert_eq!(
            html,
            concat!(
                r#"<div class="stat-card"><div class="stat-number">4</div><div class="stat-label">PhD Students</div></div>"#,
                r#"<div class="stat-card"><div class="stat-number">15</div><div class="stat-label">MSc Theses</div></div>"#
            )
        );
    }
}
