//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a programmable mock backend on an ephemeral port.
///
/// The closure decides the status and JSON body of every reply; the bound
/// address is returned so the test can point a reader at it.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request head before replying.
                        let mut buf = [0u8; 4096];
                        let mut head = Vec::new();
                        loop {
                            match socket.read(&mut buf).await {
                                Ok(0) => return,
                                Ok(n) => {
                                    head.extend_from_slice(&buf[..n]);
                                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            402 => "402 Payment Required",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Success envelope for a screenplay id.
pub fn success_body(screenplay_id: &str) -> String {
    serde_json::json!({
        "success": true,
        "data": {
            "screenplay_id": screenplay_id,
            "content": "ok"
        }
    })
    .to_string()
}

/// Generic backend-failure body.
pub fn failure_body(message: &str) -> String {
    serde_json::json!({
        "error": "INTERNAL",
        "message": message
    })
    .to_string()
}
