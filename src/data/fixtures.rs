//! Sample documents shared by tests.

pub const PERSONAL: &str = r#"{
    "name": "Jane Smith",
    "title": "Associate Professor of Computer Science",
    "heroTitle": "Hello, I'm Jane",
    "heroSubtitle": "I study learning systems & graphs",
    "bio": ["First paragraph.", "Second <paragraph>."],
    "education": [
        {"degree": "PhD in Computer Science", "institution": "MIT", "year": 2015},
        {"degree": "BSc", "institution": "ETH Zurich", "year": "2010"}
    ],
    "quickFacts": [
        {"label": "Office", "value": "Room 4.12"},
        {"label": "Students", "value": 12}
    ],
    "researchInterests": [
        {"icon": "fas fa-brain", "title": "Machine Learning", "description": "Learning on graphs."},
        {"icon": "fas fa-code", "title": "Compilers", "description": "Compiling neural networks."}
    ],
    "supervision": [
        {"type": "PhD Students", "count": 4},
        {"type": "MSc Theses", "count": 15}
    ],
    "contact": {"email": "jane.smith@uni.edu"},
    "socialLinks": [
        {"platform": "GitHub", "url": "https://github.com/jsmith", "icon": "fab fa-github"},
        {"platform": "Google Scholar", "url": "https://scholar.google.com/jsmith", "icon": "fas fa-graduation-cap"}
    ],
    "footer": {"copyright": "Jane Smith", "lastUpdated": "January 2024"}
}"#;

pub const PUBLICATIONS: &str = r#"[
    {
        "title": "Deep Learning for Graphs",
        "authors": ["J. Smith", "A. Lee"],
        "venue": "NeurIPS",
        "year": 2022,
        "featured": true,
        "links": [{"type": "PDF", "url": "https://example.com/dlg.pdf"}, {"type": "Code", "url": "https://github.com/jsmith/dlg"}]
    },
    {
        "title": "Robust Optimization at Scale",
        "authors": ["B. Chen", "J. Smith"],
        "venue": "ICML",
        "year": 2023,
        "featured": false,
        "links": [{"type": "PDF", "url": "https://example.com/robust.pdf"}]
    },
    {
        "title": "Sparse Models",
        "authors": ["C. Wu"],
        "venue": "JMLR",
        "year": 2022,
        "featured": false,
        "links": []
    }
]"#;

pub const COURSES: &str = r#"[
    {
        "courseCode": "CS101",
        "title": "Introduction to Programming",
        "level": "Undergraduate",
        "semester": "Fall 2024",
        "description": "Fundamentals of programming in Python, covering control flow, data structures, recursion and basic algorithm analysis for first-year students.",
        "students": 180,
        "schedule": "Mon/Wed 10:00",
        "room": "Hall A",
        "status": "current"
    },
    {
        "courseCode": "CS550",
        "title": "Advanced Machine Learning",
        "level": "Graduate",
        "semester": "Spring 2023",
        "description": "Graph neural networks and probabilistic models.",
        "students": 40,
        "schedule": "Tue 14:00",
        "room": "B-201",
        "status": "past"
    },
    {
        "courseCode": "CS420",
        "title": "Compiler Construction",
        "level": "Undergraduate",
        "semester": "Fall 2024",
        "description": "Parsing, type checking and code generation.",
        "students": 60,
        "schedule": "Thu 09:00",
        "room": "C-3",
        "status": "current"
    }
]"#;

pub const PROJECTS: &str = r#"[
    {
        "title": "Graph Toolkit",
        "description": "A library for graph learning.",
        "technologies": ["Python", "PyTorch"],
        "status": "completed",
        "featured": false,
        "links": [{"type": "GitHub", "url": "https://github.com/jsmith/gt", "icon": "fab fa-github"}]
    },
    {
        "title": "Neural Compiler",
        "description": "Compiling neural networks to efficient kernels.",
        "technologies": ["Rust", "MLIR"],
        "status": "active",
        "featured": false,
        "links": []
    },
    {
        "title": "Open Data Platform",
        "description": "Sharing research datasets.",
        "technologies": ["TypeScript"],
        "status": "pending",
        "featured": true,
        "funding": "NSF Grant #123",
        "links": [{"type": "Website", "url": "https://odp.example.com", "icon": "fas fa-globe"}]
    }
]"#;

/// All four documents parsed into a `PageData`.
pub fn page_data() -> super::PageData {
    super::PageData {
        personal: serde_json::from_str(PERSONAL).unwrap(),
        publications: serde_json::from_str(PUBLICATIONS).unwrap(),
        courses: serde_json::from_str(COURSES).unwrap(),
        projects: serde_json::from_str(PROJECTS).unwrap(),
    }
}
