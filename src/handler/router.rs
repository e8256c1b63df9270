//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method dispatch, the booking
//! proxy route, and the static file fallback. Every branch funnels through
//! `http::decorate`, so CORS and cache headers are uniform across success
//! and error responses.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use crate::proxy;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    let response = dispatch(req, &method, &path, &state).await;
    let response = http::decorate(response, &path);

    if state.config.logging.access_log {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        logger::log_access(
            &peer_addr,
            method.as_str(),
            &path,
            query.as_deref(),
            response.status().as_u16(),
            body_bytes,
        );
    }

    Ok(response)
}

/// Dispatch on method and path
async fn dispatch(
    req: Request<Incoming>,
    method: &Method,
    path: &str,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    match *method {
        Method::OPTIONS => http::build_preflight_response(),
        Method::POST if path == state.config.upstream.route => proxy::forward(req, state).await,
        Method::POST => http::build_404_response(),
        Method::GET | Method::HEAD => {
            static_files::serve(path, *method == Method::HEAD, &state.config.site).await
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    }
}
