//! Uniform response decoration module
//!
//! Every response leaving the server — static files, proxy replies,
//! preflights, and errors alike — gets the permissive CORS header and the
//! cache policy derived from the request path. Modeled as an explicit
//! decorator applied at the end of request dispatch rather than scattering
//! the headers across the individual response builders.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, EXPIRES, PRAGMA};
use hyper::Response;

use super::cache::CachePolicy;

/// Stamp CORS and cache-control headers onto a response
///
/// Overwrites any Cache-Control a handler may have set, matching the
/// server's rule that the path's file type decides caching for all
/// response kinds, error responses included.
pub fn decorate(mut response: Response<Full<Bytes>>, request_path: &str) -> Response<Full<Bytes>> {
    let policy = CachePolicy::classify(request_path);

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(policy.cache_control()),
    );

    // HTTP/1.0 caches only understand Pragma/Expires
    if policy == CachePolicy::NoStore {
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(EXPIRES, HeaderValue::from_static("0"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_response(status: u16) -> Response<Full<Bytes>> {
        Response::builder()
            .status(status)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> Option<&'a str> {
        resp.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_cors_on_every_status() {
        for status in [200, 404, 405, 500, 502] {
            let resp = decorate(empty_response(status), "/anything");
            assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
        }
    }

    #[test]
    fn test_no_store_profile_adds_legacy_headers() {
        let resp = decorate(empty_response(200), "/style.css");
        assert_eq!(
            header(&resp, "cache-control"),
            Some("no-cache, no-store, must-revalidate")
        );
        assert_eq!(header(&resp, "pragma"), Some("no-cache"));
        assert_eq!(header(&resp, "expires"), Some("0"));
    }

    #[test]
    fn test_immutable_profile() {
        let resp = decorate(empty_response(200), "/logo.png");
        assert_eq!(
            header(&resp, "cache-control"),
            Some("public, max-age=31536000, immutable")
        );
        assert!(header(&resp, "pragma").is_none());
    }

    #[test]
    fn test_default_profile_on_errors_too() {
        let resp = decorate(empty_response(404), "/missing/thing");
        assert_eq!(header(&resp, "cache-control"), Some("no-cache"));
    }

    #[test]
    fn test_overwrites_handler_cache_control() {
        let resp = Response::builder()
            .status(200)
            .header("Cache-Control", "public, max-age=3600")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = decorate(resp, "/booking.html");
        assert_eq!(
            header(&resp, "cache-control"),
            Some("no-cache, no-store, must-revalidate")
        );
    }
}
