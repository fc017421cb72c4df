//! Shared utilities for integration testing.

use std::net::SocketAddr;

use lbaas_relay::config::RelayConfig;
use lbaas_relay::resource::{Member, Pool};
use lbaas_relay::LbaasDriver;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::MockServer;

pub const USERNAME: &str = "onos";
pub const PASSWORD: &str = "rocks";

/// Relay config pointing at `base_url` with short timeouts.
pub fn config_for(base_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.controller.url_path = base_url.to_string();
    config.controller.username = USERNAME.to_string();
    config.controller.password = PASSWORD.to_string();
    config.controller.namespace = "lbaas".to_string();
    config.timeouts.connect_secs = 2;
    config.timeouts.request_secs = 2;
    config
}

/// Start a mock controller and a driver wired to it.
pub async fn start_mock_controller() -> (MockServer, LbaasDriver) {
    let server = MockServer::start().await;
    let driver = LbaasDriver::new(&config_for(&server.uri())).unwrap();
    (server, driver)
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start a controller that accepts one connection, records the raw request
/// head and answers `204 No Content`.
#[allow(dead_code)]
pub async fn start_recording_controller() -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket
                .write_all(b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
            let _ = socket.shutdown().await;
            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
        }
    });

    (addr, rx)
}

#[allow(dead_code)]
pub fn pool(id: &str) -> Pool {
    Pool {
        id: id.to_string(),
        name: Some("web".to_string()),
        protocol: "HTTP".to_string(),
        lb_algorithm: "ROUND_ROBIN".to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn member(pool_id: &str, id: &str) -> Member {
    Member {
        id: id.to_string(),
        pool_id: pool_id.to_string(),
        address: "10.0.0.5".to_string(),
        protocol_port: 8080,
        ..Default::default()
    }
}
