//! Static file serving module
//!
//! Loads files from the site root with traversal protection and builds the
//! responses, including index-file fallback for directory requests.

use crate::config::SiteConfig;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a GET/HEAD request from the site root
pub async fn serve(request_path: &str, is_head: bool, site: &SiteConfig) -> Response<Full<Bytes>> {
    match load(request_path, site).await {
        Some((content, content_type)) => build_file_response(content, content_type, is_head),
        None => http::build_404_response(),
    }
}

/// Resolve a request path inside the site root and read the file
///
/// Directory requests fall back to the configured index files. Anything
/// that escapes the root after canonicalization is refused.
async fn load(request_path: &str, site: &SiteConfig) -> Option<(Vec<u8>, &'static str)> {
    let relative = request_path.trim_start_matches('/');
    let mut file_path = Path::new(&site.root).join(relative);

    let root = match Path::new(&site.root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Site root not found or inaccessible '{}': {e}",
                site.root
            ));
            return None;
        }
    };

    if file_path.is_dir() || relative.is_empty() || relative.ends_with('/') {
        file_path = resolve_index(&file_path, &site.index_files)?;
    }

    // File not found is common (404), no need to log
    let resolved = file_path.canonicalize().ok()?;
    if !resolved.starts_with(&root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }

    let content = match fs::read(&resolved).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", resolved.display()));
            return None;
        }
    };

    let content_type = mime::get_content_type(resolved.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// First existing index file under a directory
fn resolve_index(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|index| dir.join(index))
        .find(|candidate| candidate.is_file())
}

/// Build a 200 file response; HEAD keeps headers but drops the body
fn build_file_response(
    content: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build file response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}
