//! Local development tooling for the static booking site.
//!
//! Two tools share this library:
//! - `sitedev` — an HTTP server that serves the site from a directory,
//!   stamps CORS and cache-control headers on every response, and proxies
//!   the booking widget's POST endpoint to the ReMarked API.
//! - `docsync` — a one-off copier that moves downloaded policy documents
//!   into the site's assets directory, verifying sizes.

pub mod config;
pub mod copier;
pub mod handler;
pub mod http;
pub mod logger;
pub mod proxy;
pub mod server;
