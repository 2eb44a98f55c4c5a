//! Footer copyright and last-updated lines.

use super::RenderOptions;
use crate::data::Personal;
use crate::dom::{Patch, Target};

pub fn populate(personal: &Personal, options: &RenderOptions) -> Vec<Patch> {
    vec![
        Patch::text(
            Target::id("footer-copyright"),
            format!(
                "© {} {}. All rights reserved.",
                options.copyright_year, personal.footer.copyright
            ),
        ),
        Patch::text(
            Target::id("footer-updated"),
            format!("Last updated: {}", personal.footer.last_updated),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_footer_lines() {
        let personal = fixtures::page_data().personal;
        let options = RenderOptions {
            copyright_year: 2024,
            ..RenderOptions::default()
        };
        let patches = populate(&personal, &options);

        assert_eq!(
            patches[0],
            Patch::text(Target::id("footer-copyright"), "© 2024 Jane Smith. All rights reserved.")
        );
        assert_eq!(
            patches[1],
            Patch::text(Target::id("footer-updated"), "Last updated: January 2024")
        );
    }
}
