//! Preview server for the built site.
//!
//! A small `tiny_http` loop over `config.build.output`:
//!
//! - Static file serving with `index.html` resolution for directories
//! - A welcome page while the output directory is still empty
//! - Graceful shutdown on Ctrl+C

use crate::{config::SiteConfig, embed::WELCOME_PAGE, log};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Serve the output directory until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &config.build.output) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);
        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }
    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// What a request path resolves to.
#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    File(PathBuf),
    Welcome,
    NotFound,
}

/// Resolve a raw request URL against the serve root.
///
/// Resolution order: exact file, directory `index.html`, welcome page for an
/// empty root, otherwise 404.
fn resolve(root: &Path, url: &str) -> Resolved {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(url)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();
    let path = url_path.split('?').next().unwrap_or_default();
    let request_path = path.trim_matches('/');

    if request_path.split('/').any(|segment| segment == "..") {
        return Resolved::NotFound;
    }

    let local_path = root.join(request_path);
    if local_path.is_file() {
        return Resolved::File(local_path);
    }
    if local_path.is_dir() {
        let index = local_path.join("index.html");
        if index.is_file() {
            return Resolved::File(index);
        }
        if request_path.is_empty() && is_dir_empty(root) {
            return Resolved::Welcome;
        }
    }
    Resolved::NotFound
}

fn is_dir_empty(path: &Path) -> bool {
    fs::read_dir(path).map(|mut entries| entries.next().is_none()).unwrap_or(true)
}

fn handle_request(request: Request, root: &Path) -> Result<()> {
    match resolve(root, request.url()) {
        Resolved::File(path) => serve_file(request, &path),
        Resolved::Welcome => serve_html(
            request,
            WELCOME_PAGE
                .replace("{title}", "Welcome")
                .replace("{version}", env!("CARGO_PKG_VERSION")),
        ),
        Resolved::NotFound => serve_not_found(request),
    }
}

fn content_type(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("Invalid header value `{value}`"))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(content).with_header(content_type(guess_content_type(path))?);
    request.respond(response)?;
    Ok(())
}

fn serve_html(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content).with_header(content_type("text/html; charset=utf-8")?);
    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![content_type("text/plain")?],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_index_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("index.html"), "home").unwrap();
        fs::create_dir(root.join("css")).unwrap();
        fs::write(root.join("css").join("my style.css"), "").unwrap();

        assert_eq!(resolve(root, "/"), Resolved::File(root.join("index.html")));
        assert_eq!(resolve(root, "/index.html?v=123"), Resolved::File(root.join("index.html")));
        assert_eq!(
            resolve(root, "/css/my%20style.css"),
            Resolved::File(root.join("css").join("my style.css"))
        );
        assert_eq!(resolve(root, "/css/"), Resolved::NotFound);
        assert_eq!(resolve(root, "/missing.html"), Resolved::NotFound);
    }

    #[test]
    fn test_resolve_rejects_parent_segments() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("secret.txt"), "").unwrap();

        assert_eq!(resolve(&dir.path().join("public"), "/../secret.txt"), Resolved::NotFound);
    }

    #[test]
    fn test_empty_root_gets_welcome() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve(dir.path(), "/"), Resolved::Welcome);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.html")), "text/html; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("a.woff2")), "font/woff2");
        assert_eq!(guess_content_type(Path::new("a")), "application/octet-stream");
    }
}
