// tests/integration/session_test.rs

//! Integration tests for the per-session dispatch loop
//! Tests: reply ordering, error recovery, line limits, shutdown, and cleanup.

use super::fixtures::*;
use super::test_helpers::log_reload_handle;
use gradebridge::config::Config;
use gradebridge::connection::ConnectionHandler;
use gradebridge::core::BridgeError;
use gradebridge::core::gui::GuiMode;
use gradebridge::core::state::{ClientOrigin, ServerState};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, duplex};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

struct Session {
    state: Arc<ServerState>,
    session_id: u64,
    client: BufReader<DuplexStream>,
    global_shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<Result<(), BridgeError>>,
}

fn start(config: Config) -> Session {
    let state = ServerState::initialize(config, None, log_reload_handle());
    let (session_id, shutdown_rx) = state.register_client(ClientOrigin::Stdio);
    let (global_shutdown_tx, global_shutdown_rx) = broadcast::channel(1);
    let (client, server) = duplex(64 * 1024);

    let handler_state = state.clone();
    let task = tokio::spawn(async move {
        let mut handler = ConnectionHandler::new(
            server,
            ClientOrigin::Stdio,
            handler_state,
            session_id,
            shutdown_rx,
            global_shutdown_rx,
        )
        .await;
        handler.run().await
    });

    Session {
        state,
        session_id,
        client: BufReader::new(client),
        global_shutdown_tx,
        task,
    }
}

impl Session {
    async fn send(&mut self, text: &str) {
        self.client.get_mut().write_all(text.as_bytes()).await.unwrap();
    }

    async fn read_reply(&mut self) -> String {
        let mut line = String::new();
        tokio::time::timeout(Duration::from_secs(5), self.client.read_line(&mut line))
            .await
            .expect("timed out waiting for a reply")
            .unwrap();
        line.trim_end_matches('\n').to_string()
    }

    async fn request(&mut self, line: &str) -> String {
        self.send(&format!("{line}\n")).await;
        self.read_reply().await
    }

    async fn finish(self) -> (Arc<ServerState>, Result<(), BridgeError>) {
        let Session {
            state,
            client,
            task,
            global_shutdown_tx,
            ..
        } = self;
        drop(client);
        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("handler did not finish")
            .unwrap();
        drop(global_shutdown_tx);
        (state, result)
    }
}

#[tokio::test]
async fn test_replies_follow_request_order() {
    let mut session = start(Config::default());

    session
        .send(concat!(
            "addTest(\"a\", \"cat\", true)\r\n",
            "\n",
            "setTestResult(\"a\", pass, true)\n",
            "getTestCounts(true)\n",
            "ClearTestResults(true)\n",
            "getTestCounts(true)\n",
        ))
        .await;

    let mut replies = Vec::new();
    for _ in 0..5 {
        replies.push(session.read_reply().await);
    }
    assert_eq!(
        replies,
        ["result:ok", "result:ok", "result:1,0,1", "result:ok", "result:0,0,1"]
    );

    let (_, result) = session.finish().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_parse_error_does_not_end_session() {
    let mut session = start(Config::default());

    let reply = session.request("ClearTestResults(maybe)").await;
    assert_eq!(reply, "error:'maybe' is not a boolean literal");

    assert_eq!(session.request(CLEAR_FUNCTIONAL).await, "result:ok");
    assert_eq!(session.request(COUNTS_FUNCTIONAL).await, "result:0,0,0");

    let stats = &session.state.stats;
    assert_eq!(stats.get_failed_requests(), 1);
    assert_eq!(stats.get_total_commands(), 2);

    let (_, result) = session.finish().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_views_released_when_session_ends() {
    let mut session = start(Config::default());
    let session_id = session.session_id;

    assert_eq!(session.request(CLEAR_STYLE).await, "result:ok");
    assert_eq!(session.request(CLEAR_FUNCTIONAL).await, "result:ok");
    assert!(session.state.gui_registry.peek(session_id, GuiMode::StyleCheck).is_some());
    assert_eq!(session.state.gui_registry.len(), 2);

    let (state, result) = session.finish().await;
    assert!(result.is_ok());
    assert!(state.gui_registry.is_empty());
    assert!(!state.clients.contains_key(&session_id));
}

#[tokio::test]
async fn test_line_too_long_ends_session() {
    let mut config = Config::default();
    config.max_line_length = 64;
    let mut session = start(config);

    let long = format!("addTest(\"{}\", \"c\", true)\n", "x".repeat(200));
    session.send(&long).await;
    assert_eq!(session.read_reply().await, "error:request line exceeds 64 bytes");

    let (_, result) = session.finish().await;
    assert_eq!(result, Err(BridgeError::LineTooLong(64)));
}

#[tokio::test]
async fn test_unterminated_final_line_is_processed() {
    let mut session = start(Config::default());
    session.send(CLEAR_STYLE).await;
    session.client.get_mut().shutdown().await.unwrap();

    assert_eq!(session.read_reply().await, "result:ok");
    let (_, result) = session.finish().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_global_shutdown_notifies_session() {
    let mut session = start(Config::default());
    assert_eq!(session.request(CLEAR_STYLE).await, "result:ok");

    session.global_shutdown_tx.send(()).unwrap();
    assert_eq!(session.read_reply().await, "error:bridge is shutting down");

    let (state, result) = session.finish().await;
    assert!(result.is_ok());
    assert!(state.gui_registry.is_empty());
}

#[tokio::test]
async fn test_targeted_kill_ends_session() {
    let mut session = start(Config::default());
    let shutdown_tx = session
        .state
        .clients
        .get(&session.session_id)
        .map(|entry| entry.1.clone())
        .unwrap();

    shutdown_tx.send(()).unwrap();
    // The client is still connected; only the kill signal can end the handler.
    let result = tokio::time::timeout(Duration::from_secs(5), &mut session.task)
        .await
        .expect("handler ignored the kill signal")
        .unwrap();
    assert!(result.is_ok());
    assert!(session.state.clients.is_empty());
}

#[tokio::test]
async fn test_scripted_exchange_with_mock_stream() {
    let stream = tokio_test::io::Builder::new()
        .read(b"AutograderUnitTest.addTest(\"a\", \"cat\", false)\n")
        .write(b"result:ok\n")
        .read(b"ClearTestResults(false)\nClearTestResults(yes)\n")
        .write(b"result:ok\n")
        .write(b"error:'yes' is not a boolean literal\n")
        .build();

    let state = ServerState::initialize(Config::default(), None, log_reload_handle());
    let (session_id, shutdown_rx) = state.register_client(ClientOrigin::Stdio);
    let (_global_tx, global_rx) = broadcast::channel(1);
    let mut handler = ConnectionHandler::new(
        stream,
        ClientOrigin::Stdio,
        state.clone(),
        session_id,
        shutdown_rx,
        global_rx,
    )
    .await;

    assert!(handler.run().await.is_ok());
    assert_eq!(handler.session().succeeded, 2);
    assert_eq!(handler.session().failed, 1);
    assert!(state.gui_registry.is_empty());
}
