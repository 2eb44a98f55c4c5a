//! Parallel loading of the four data documents.
//!
//! ```text
//!             ┌── personal.json ─────┐
//!             ├── publications.json ─┤
//! load() ─────┤                      ├──► try_join! ──► PageData
//!             ├── courses.json ──────┤      (first error wins)
//!             └── projects.json ─────┘
//! ```
//!
//! Remote sources get `?v=<unix-millis>` appended to every request so that
//! intermediary caches never serve a stale document.

use super::error::{LoadError, SourceKind};
use super::lenient::Document;
use super::types::{Course, PageData, Personal, Project, Publication};
use crate::config::SiteConfig;
use anyhow::{Context, Result};
use std::{path::PathBuf, time::Duration};

/// Where the documents live.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local directory.
    Dir(PathBuf),
    /// `http(s)://` base URL.
    Remote {
        base: String,
        client: reqwest::Client,
        cache_bust: bool,
    },
}

/// Loads all four documents from one source.
#[derive(Debug, Clone)]
pub struct DataLoader {
    source: DataSource,
    personal: String,
    publications: String,
    courses: String,
    projects: String,
}

/// Current cache-busting token (milliseconds since the Unix epoch).
pub fn cache_bust_token() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl DataLoader {
    /// Build a loader from `[data]`.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let data = &config.data;
        let source = if data.is_remote() {
            let mut builder = reqwest::Client::builder();
            if let Some(secs) = data.timeout_secs {
                builder = builder.timeout(Duration::from_secs(secs));
            }
            DataSource::Remote {
                base: data.source.trim_end_matches('/').to_owned(),
                client: builder.build().context("Failed to create HTTP client")?,
                cache_bust: data.cache_bust,
            }
        } else {
            DataSource::Dir(PathBuf::from(&data.source))
        };

        Ok(Self {
            source,
            personal: data.personal.clone(),
            publications: data.publications.clone(),
            courses: data.courses.clone(),
            projects: data.projects.clone(),
        })
    }

    /// File name of a document.
    pub fn file_name(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Personal => &self.personal,
            SourceKind::Publications => &self.publications,
            SourceKind::Courses => &self.courses,
            SourceKind::Projects => &self.projects,
        }
    }

    /// Human-readable location of the source, for logging.
    pub fn location(&self) -> String {
        match &self.source {
            DataSource::Dir(dir) => dir.display().to_string(),
            DataSource::Remote { base, .. } => base.clone(),
        }
    }

    /// Load all four documents concurrently.
    ///
    /// Succeeds only if every document is retrieved and is valid JSON; the
    /// first failure is returned as soon as it happens. Malformed records
    /// inside a document are skipped rather than failing the load.
    pub async fn load(&self) -> Result<PageData, LoadError> {
        let (personal, publications, courses, projects) = tokio::try_join!(
            self.fetch::<Personal>(SourceKind::Personal),
            self.fetch::<Vec<Publication>>(SourceKind::Publications),
            self.fetch::<Vec<Course>>(SourceKind::Courses),
            self.fetch::<Vec<Project>>(SourceKind::Projects),
        )?;

        Ok(PageData {
            personal,
            publications,
            courses,
            projects,
        })
    }

    /// Request URL of a remote document, with the cache-busting token if enabled.
    pub fn request_url(&self, kind: SourceKind, token: i64) -> Option<String> {
        match &self.source {
            DataSource::Remote {
                base, cache_bust, ..
            } => {
                let url = format!("{base}/{}", self.file_name(kind));
                Some(if *cache_bust { format!("{url}?v={token}") } else { url })
            }
            DataSource::Dir(_) => None,
        }
    }

    async fn fetch<T: Document>(&self, kind: SourceKind) -> Result<T, LoadError> {
        let bytes = match &self.source {
            DataSource::Dir(dir) => {
                let path = dir.join(self.file_name(kind));
                tokio::fs::read(&path).await.map_err(|cause| LoadError::Io {
                    kind,
                    path,
                    cause,
                })?
            }
            DataSource::Remote { client, .. } => {
                let url = self
                    .request_url(kind, cache_bust_token())
                    .unwrap_or_default();
                fetch_remote(client, &url, kind).await?
            }
        };

        T::from_json(kind, &bytes)
    }
}

async fn fetch_remote(
    client: &reqwest::Client,
    url: &str,
    kind: SourceKind,
) -> Result<Vec<u8>, LoadError> {
    let transport = |cause| LoadError::Transport { kind, cause };

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            kind,
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use std::{
        fs,
        path::Path,
        sync::{Arc, Mutex},
    };
    use tiny_http::{Response, Server, StatusCode};

    fn write_fixtures(dir: &Path) {
        fs::write(dir.join("personal.json"), fixtures::PERSONAL).unwrap();
        fs::write(dir.join("publications.json"), fixtures::PUBLICATIONS).unwrap();
        fs::write(dir.join("courses.json"), fixtures::COURSES).unwrap();
        fs::write(dir.join("projects.json"), fixtures::PROJECTS).unwrap();
    }

    fn dir_config(dir: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.data.source = dir.to_string_lossy().into_owned();
        config
    }

    /// Serve `dir` over HTTP; `missing` answers 404. Returns base URL and request log.
    fn spawn_server(dir: PathBuf, missing: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let url = request.url().to_owned();
                log.lock().unwrap().push(url.clone());
                let path = url.split('?').next().unwrap_or_default().trim_start_matches('/');
                let file = dir.join(path);
                let response = if path == missing || !file.is_file() {
                    Response::from_string("not found").with_status_code(StatusCode(404))
                } else {
                    Response::from_data(fs::read(file).unwrap())
                };
                request.respond(response).ok();
            }
        });

        (format!("http://127.0.0.1:{port}"), seen)
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        let loader = DataLoader::from_config(&dir_config(dir.path())).unwrap();
        let data = loader.load().await.unwrap();

        assert_eq!(data.personal.name, "Jane Smith");
        assert_eq!(data.publications.len(), 3);
        assert_eq!(data.courses.len(), 3);
        assert_eq!(data.projects.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_file_names_source() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        fs::remove_file(dir.path().join("courses.json")).unwrap();

        let loader = DataLoader::from_config(&dir_config(dir.path())).unwrap();
        let err = loader.load().await.unwrap_err();

        assert!(matches!(err, LoadError::Io { kind: SourceKind::Courses, .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        fs::write(dir.path().join("publications.json"), "[{\"title\": ").unwrap();

        let loader = DataLoader::from_config(&dir_config(dir.path())).unwrap();
        let err = loader.load().await.unwrap_err();

        assert_eq!(err.kind(), SourceKind::Publications);
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_malformed_records_degrade_locally() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        fs::write(
            dir.path().join("publications.json"),
            r#"[
                {"title": "String year", "authors": ["J. Smith"], "venue": "ICML", "year": "2021"},
                {"title": "Numeric year", "venue": "NeurIPS", "year": 2023},
                {"title": 42, "year": 2020}
            ]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("personal.json"),
            r#"{"name": "Jane Smith", "researchInterests": [{"title": "Robustness", "description": "Shift"}]}"#,
        )
        .unwrap();

        let loader = DataLoader::from_config(&dir_config(dir.path())).unwrap();
        let data = loader.load().await.unwrap();

        assert_eq!(data.personal.name, "Jane Smith");
        assert_eq!(data.personal.research_interests[0].icon, "");
        assert_eq!(data.publications.len(), 2);
        assert_eq!(data.publications[0].year.as_int(), Some(2021));
        assert_eq!(data.courses.len(), 3);
    }

    #[tokio::test]
    async fn test_remote_load_appends_cache_bust_token() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let (base, seen) = spawn_server(dir.path().to_path_buf(), "");

        let mut config = SiteConfig::default();
        config.data.source = format!("{base}/");
        let loader = DataLoader::from_config(&config).unwrap();
        let data = loader.load().await.unwrap();

        assert_eq!(data.projects.len(), 3);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|url| url.contains(".json?v=")));
    }

    #[tokio::test]
    async fn test_remote_404_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let (base, _) = spawn_server(dir.path().to_path_buf(), "projects.json");

        let mut config = SiteConfig::default();
        config.data.source = base;
        let loader = DataLoader::from_config(&config).unwrap();
        let err = loader.load().await.unwrap_err();

        assert!(matches!(
            err,
            LoadError::Status {
                kind: SourceKind::Projects,
                status: 404
            }
        ));
        assert!(err.user_message().starts_with("Data loading failed: "));
    }

    #[test]
    fn test_request_url_without_cache_bust() {
        let mut config = SiteConfig::default();
        config.data.source = "https://example.com/data".into();
        config.data.cache_bust = false;
        let loader = DataLoader::from_config(&config).unwrap();

        assert_eq!(
            loader.request_url(SourceKind::Courses, 42).as_deref(),
            Some("https://example.com/data/courses.json")
        );

        config.data.cache_bust = true;
        let loader = DataLoader::from_config(&config).unwrap();
        assert_eq!(
            loader.request_url(SourceKind::Courses, 42).as_deref(),
            Some("https://example.com/data/courses.json?v=42")
        );
    }
}
