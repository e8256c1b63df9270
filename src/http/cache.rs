//! HTTP cache control module
//!
//! Classifies request paths into the cache profiles the dev server applies
//! to every response. JS/CSS/HTML must never be cached, otherwise widget
//! changes do not show up on reload; images and fonts are fingerprint-free
//! but change rarely, so they cache for a year.

use std::path::Path;

/// Cache control policy, keyed by file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Revalidate and store nothing: scripts, styles, markup
    NoStore,
    /// Long-lived immutable caching: images and fonts
    Immutable,
    /// Default for everything else
    NoCache,
}

const NO_STORE_EXTENSIONS: &[&str] = &["js", "css", "html"];
const IMMUTABLE_EXTENSIONS: &[&str] = &[
    "webp", "png", "jpg", "jpeg", "svg", "woff2", "woff", "ttf", "otf", "ico",
];

impl CachePolicy {
    /// Classify a request path by its file extension
    ///
    /// The query string (if any) is ignored and matching is
    /// case-insensitive. Paths without an extension get the default.
    pub fn classify(request_path: &str) -> Self {
        let path = request_path
            .split('?')
            .next()
            .unwrap_or(request_path)
            .to_ascii_lowercase();

        let Some(extension) = Path::new(&path).extension().and_then(|e| e.to_str()) else {
            return Self::NoCache;
        };

        if NO_STORE_EXTENSIONS.contains(&extension) {
            Self::NoStore
        } else if IMMUTABLE_EXTENSIONS.contains(&extension) {
            Self::Immutable
        } else {
            Self::NoCache
        }
    }

    /// Cache-Control header value for this policy
    pub const fn cache_control(self) -> &'static str {
        match self {
            Self::NoStore => "no-cache, no-store, must-revalidate",
            Self::Immutable => "public, max-age=31536000, immutable",
            Self::NoCache => "no-cache",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_no_store() {
        assert_eq!(CachePolicy::classify("/style.css"), CachePolicy::NoStore);
        assert_eq!(CachePolicy::classify("/js/booking.js"), CachePolicy::NoStore);
        assert_eq!(CachePolicy::classify("/booking.html"), CachePolicy::NoStore);
    }

    #[test]
    fn test_classify_immutable() {
        assert_eq!(CachePolicy::classify("/logo.png"), CachePolicy::Immutable);
        assert_eq!(
            CachePolicy::classify("/fonts/inter.woff2"),
            CachePolicy::Immutable
        );
        assert_eq!(CachePolicy::classify("/favicon.ico"), CachePolicy::Immutable);
    }

    #[test]
    fn test_classify_default() {
        assert_eq!(CachePolicy::classify("/data.json"), CachePolicy::NoCache);
        assert_eq!(CachePolicy::classify("/"), CachePolicy::NoCache);
        assert_eq!(CachePolicy::classify("/api/remarked"), CachePolicy::NoCache);
    }

    #[test]
    fn test_classify_ignores_query_and_case() {
        assert_eq!(
            CachePolicy::classify("/widget.js?v=123"),
            CachePolicy::NoStore
        );
        assert_eq!(CachePolicy::classify("/LOGO.PNG"), CachePolicy::Immutable);
    }

    #[test]
    fn test_header_values() {
        assert_eq!(
            CachePolicy::NoStore.cache_control(),
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(
            CachePolicy::Immutable.cache_control(),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(CachePolicy::NoCache.cache_control(), "no-cache");
    }
}
