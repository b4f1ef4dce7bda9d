// Server loop module
// Accepts connections one at a time until shutdown is signalled

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::serve_connection;
use crate::config;
use crate::logger;

/// Serial accept loop.
///
/// Each connection is served to completion before the next `accept()`. A
/// shutdown notification interrupts either the wait for a client or the
/// connection currently being served; the listener is closed on return.
pub async fn start_server_loop(
    listener: TcpListener,
    config: Arc<config::Config>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        let served = serve_connection(stream, peer_addr, Arc::clone(&config));
                        tokio::select! {
                            () = served => {}
                            () = shutdown.notified() => break,
                        }
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    logger::log_shutdown();
    drop(listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::create_listener;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_clients_in_turn_then_stops() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap(), 16).unwrap();
        let addr = listener.local_addr().unwrap();
        let mut cfg = config::Config::from_defaults();
        cfg.logging.access_log = false;
        let shutdown = Arc::new(Notify::new());

        let server = tokio::spawn(start_server_loop(
            listener,
            Arc::new(cfg),
            Arc::clone(&shutdown),
        ));

        for symbol in ["eurusd", "usdcad"] {
            let mut client = tokio::net::TcpStream::connect(addr).await.unwrap();
            let request =
                format!("GET /sentiment/analyze/{symbol}/ HTTP/1.1\r\nHost: localhost\r\n\r\n");
            client.write_all(request.as_bytes()).await.unwrap();
            let mut raw = String::new();
            client.read_to_string(&mut raw).await.unwrap();
            assert!(raw.starts_with("HTTP/1.1 200 OK"), "{raw}");
            assert!(raw.contains(&symbol.to_uppercase()));
        }

        shutdown.notify_one();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server loop should stop after shutdown")
            .unwrap();

        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_partial_request() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap(), 16).unwrap();
        let addr = listener.local_addr().unwrap();
        let mut cfg = config::Config::from_defaults();
        cfg.logging.access_log = false;
        let shutdown = Arc::new(Notify::new());

        let server = tokio::spawn(start_server_loop(
            listener,
            Arc::new(cfg),
            Arc::clone(&shutdown),
        ));

        // Head never completes, so the connection stays open in the serve step
        let mut client = tokio::net::TcpStream::connect(addr).await.unwrap();
        client.write_all(b"GET /sent").await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        shutdown.notify_one();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server loop should stop while a request is pending")
            .unwrap();

        let mut rest = Vec::new();
        let read = tokio::time::timeout(Duration::from_secs(5), client.read_to_end(&mut rest))
            .await
            .expect("connection should be closed after shutdown");
        // Either a clean EOF with no response bytes or a reset
        if read.is_ok() {
            assert!(rest.is_empty(), "unexpected response: {rest:?}");
        }
    }
}
