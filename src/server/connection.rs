// Connection handling module
// Serves a single TCP connection: one request, one response, then close

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{Config, LoggingConfig};
use crate::handler;
use crate::logger::{self, AccessLogEntry};

/// Serve a single connection to completion.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Builds an HTTP/1 connection with keep-alive disabled
/// 3. Serves the connection with the request handler, writing the access log
/// 4. Applies the configured read timeout to the whole connection
pub async fn serve_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    config: Arc<Config>,
) {
    let io = TokioIo::new(stream);
    let timeout_duration = Duration::from_secs(config.performance.read_timeout);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let config = Arc::clone(&config);
            async move { Ok::<_, Infallible>(respond(&req, peer_addr, &config.logging)) }
        }),
    );

    match tokio::time::timeout(timeout_duration, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout_duration.as_secs()
            ));
        }
    }
}

/// Run the handler and write one access log line when enabled
fn respond<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    logging: &LoggingConfig,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let response = handler::handle_request(req);

    if logging.access_log {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        let entry =
            AccessLogEntry::from_exchange(peer_addr, req, &response, body_bytes, started.elapsed());
        logger::log_access(&entry, logging.access_log_format);
    }

    response
}
