//! Contact details and social links.

use super::esc;
use crate::data::Personal;
use crate::dom::{Patch, Target};

pub fn populate(personal: &Personal) -> Vec<Patch> {
    let email = esc(&personal.contact.email);
    let info = format!(
        concat!(
            "<h3>Contact Information</h3>",
            r#"<div class="contact-item"><i class="fas fa-envelope"></i><div><h4>Email</h4>"#,
            r#"<p><a href="mailto:{}" style="color: inherit; text-decoration: none;">{}</a></p>"#,
            "</div></div>"
        ),
        email, email
    );

    let social: String = personal
        .social_links
        .iter()
        .map(|link| {
            let platform = esc(&link.platform);
            format!(
                concat!(
                    r#"<a href="{}" class="social-link" target="_blank" rel="noopener noreferrer" "#,
                    r#"data-tooltip="{}" aria-label="{}"><i class="{}"></i><span>{}</span></a>"#
                ),
                esc(&link.url),
                platform,
                platform,
                esc(&link.icon),
                platform
            )
        })
        .collect();

    vec![
        Patch::html(Target::id("contact-info"), info),
        Patch::append(Target::id("social-links-grid"), social),
    ]
}
