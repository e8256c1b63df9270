//! Booking API proxy module
//!
//! Forwards the booking widget's POST body to the ReMarked reservations
//! API and relays the reply. The upstream enforces its own Origin/Referer
//! checks, so the proxy sends the production site's values; the browser
//! talking to localhost only ever sees our CORS headers.
//!
//! Single best-effort forward per request: no retry, no circuit breaking.
//! The only timeout is the client-level bound configured on the reqwest
//! client at startup.

use crate::config::AppState;
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response, StatusCode};

/// Forward one request to the configured upstream
///
/// On a completed upstream exchange the body is relayed verbatim with
/// status 200. Network-level failures map to 502, a failure to read the
/// client's own body to 500, both with the JSON error envelope.
pub async fn forward(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    // Absent or zero-length bodies collect to empty, which the upstream accepts.
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read proxy request body: {e}"));
            return http::build_error_envelope(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    match send_upstream(body, state).await {
        Ok(data) => http::build_json_response(StatusCode::OK, data),
        Err(e) => {
            logger::log_error(&format!("Upstream request failed: {e}"));
            http::build_error_envelope(StatusCode::BAD_GATEWAY, &e.to_string())
        }
    }
}

/// POST the raw body to the upstream and collect the response bytes
async fn send_upstream(body: Bytes, state: &AppState) -> Result<Bytes, reqwest::Error> {
    let upstream = &state.config.upstream;

    let response = state
        .client
        .post(&upstream.url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .header(reqwest::header::ORIGIN, upstream.origin.as_str())
        .header(reqwest::header::REFERER, upstream.referer.as_str())
        .body(body)
        .send()
        .await?;

    response.bytes().await
}
