//! Files compiled into the binary.

/// Starter page written by `scholar init`.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// Starter data documents, keyed by file name.
pub const STARTER_DATA: [(&str, &str); 4] = [
    ("personal.json", include_str!("data/personal.json")),
    ("publications.json", include_str!("data/publications.json")),
    ("courses.json", include_str!("data/courses.json")),
    ("projects.json", include_str!("data/projects.json")),
];

/// Page served when the output directory is empty.
pub const WELCOME_PAGE: &str = include_str!("serve/welcome.html");
