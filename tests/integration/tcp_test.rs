// tests/integration/tcp_test.rs

//! Integration tests over real TCP sockets
//! Tests: a handler on an accepted socket, and the accept loop of `server::run`.

use super::fixtures::*;
use super::test_helpers::log_reload_handle;
use gradebridge::config::Config;
use gradebridge::connection::ConnectionHandler;
use gradebridge::core::gui::GuiMode;
use gradebridge::core::state::{ClientOrigin, ServerState};
use gradebridge::server::{self, AnyStream};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

async fn request(client: &mut BufReader<TcpStream>, line: &str) -> String {
    client
        .get_mut()
        .write_all(format!("{line}\n").as_bytes())
        .await
        .unwrap();
    read_line(client).await
}

async fn read_line(client: &mut BufReader<TcpStream>) -> String {
    let mut reply = String::new();
    tokio::time::timeout(Duration::from_secs(5), client.read_line(&mut reply))
        .await
        .expect("timed out waiting for a reply")
        .unwrap();
    reply.trim_end().to_string()
}

async fn connect_with_retry(port: u16) -> TcpStream {
    for _ in 0..50 {
        if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("bridge never started listening on port {port}");
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_handler_on_tcp_socket() {
    let state = ServerState::initialize(Config::default(), None, log_reload_handle());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (_global_tx, global_rx) = broadcast::channel(1);

    let server_state = state.clone();
    let server = tokio::spawn(async move {
        let (socket, peer) = listener.accept().await.unwrap();
        let origin = ClientOrigin::Tcp(peer);
        let (session_id, shutdown_rx) = server_state.register_client(origin.clone());
        let mut handler = ConnectionHandler::new(
            AnyStream::Tcp(socket),
            origin,
            server_state,
            session_id,
            shutdown_rx,
            global_rx,
        )
        .await;
        handler.run().await
    });

    let mut client = BufReader::new(TcpStream::connect(addr).await.unwrap());
    let add = format!("addTest(\"{TEST_NAME1}\", \"tcp\", true)");
    assert_eq!(request(&mut client, &add).await, "result:ok");
    assert_eq!(request(&mut client, CLEAR_STYLE).await, "result:ok");
    assert_eq!(request(&mut client, COUNTS_STYLE).await, "result:0,0,1");
    assert_eq!(state.gui_registry.len(), 1);

    drop(client);
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
    assert!(state.gui_registry.peek(1, GuiMode::StyleCheck).is_none());
}

#[tokio::test]
async fn test_server_rejects_clients_over_limit() {
    let mut config = Config::default();
    config.port = free_port();
    config.max_clients = 1;
    let port = config.port;

    let bridge = tokio::spawn(server::run(config, None, log_reload_handle()));

    let mut first = BufReader::new(connect_with_retry(port).await);
    assert_eq!(request(&mut first, CLEAR_FUNCTIONAL).await, "result:ok");

    let mut second = BufReader::new(TcpStream::connect(("127.0.0.1", port)).await.unwrap());
    assert_eq!(
        read_line(&mut second).await,
        "error:max number of clients reached"
    );

    // The first session keeps working.
    assert_eq!(request(&mut first, COUNTS_FUNCTIONAL).await, "result:0,0,0");
    bridge.abort();
}
