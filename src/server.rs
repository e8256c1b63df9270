//! Server loop module
//!
//! Listener construction and the accept/serve loop. The loop is strictly
//! sequential: each accepted connection is served to completion, upstream
//! wait included, before the next accept. Keep-alive is off, so one
//! connection carries exactly one request/response exchange.

use crate::config::AppState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Create a `TcpListener` with `SO_REUSEADDR` enabled
///
/// Dev servers restart constantly; reusing the address avoids waiting out
/// TIME_WAIT between runs.
pub fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    TcpListener::from_std(socket.into())
}

/// Accept and serve connections, one at a time
///
/// Connection failures are logged and never fatal; the loop keeps
/// accepting.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    loop {
        let (stream, peer_addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
                continue;
            }
        };

        let io = TokioIo::new(stream);
        let service_state = Arc::clone(&state);
        let service = service_fn(move |req| {
            let state = Arc::clone(&service_state);
            async move { handler::handle_request(req, state, peer_addr).await }
        });

        let conn = http1::Builder::new()
            .keep_alive(false)
            .serve_connection(io, service);

        if let Err(e) = conn.await {
            logger::log_connection_error(&e);
        }
    }
}
