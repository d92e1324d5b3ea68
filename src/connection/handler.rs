// src/connection/handler.rs

//! Defines the `ConnectionHandler`, the per-session dispatch loop.

use super::guard::ConnectionGuard;
use super::session::SessionState;
use crate::core::BridgeError;
use crate::core::handler::command_router::Router;
use crate::core::protocol::{BridgeCodec, ReplyFrame};
use crate::core::state::{ClientOrigin, ServerState};
use crate::server::AnyStream;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::broadcast;
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

/// Drives one session: reads request lines, executes them in order, and writes one
/// reply per line.
///
/// Commands of a session are executed strictly one after another. A failing command
/// is answered with an `error:` reply and the loop carries on with the next line;
/// only transport failures end the session.
pub struct ConnectionHandler<S = AnyStream> {
    framed: Framed<S, BridgeCodec>,
    origin: ClientOrigin,
    state: Arc<ServerState>,
    session_id: u64,
    shutdown_rx: broadcast::Receiver<()>,
    global_shutdown_rx: broadcast::Receiver<()>,
    session: SessionState,
}

impl<S> ConnectionHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new `ConnectionHandler` for an already registered session.
    pub async fn new(
        stream: S,
        origin: ClientOrigin,
        state: Arc<ServerState>,
        session_id: u64,
        shutdown_rx: broadcast::Receiver<()>,
        global_shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        let max_line_length = state.config.lock().await.max_line_length;
        let session = SessionState::new(state.backend_context(session_id));
        Self {
            framed: Framed::new(stream, BridgeCodec::new(max_line_length)),
            origin,
            state,
            session_id,
            shutdown_rx,
            global_shutdown_rx,
            session,
        }
    }

    /// The main event loop for the session.
    pub async fn run(&mut self) -> Result<(), BridgeError> {
        let _guard = ConnectionGuard::new(self.state.clone(), self.session_id, self.origin.clone());

        loop {
            tokio::select! {
                // Prioritize shutdown signals over incoming lines.
                biased;
                _ = self.global_shutdown_rx.recv() => {
                    info!("Session {} received GLOBAL shutdown signal.", self.session_id);
                    let _ = self.framed.send(ReplyFrame::Error("bridge is shutting down".into())).await;
                    break;
                }
                _ = self.shutdown_rx.recv() => {
                    info!("Session {} received kill signal.", self.session_id);
                    break;
                }
                next = self.framed.next() => match next {
                    Some(Ok(line)) => {
                        debug!("Session {}: received line: {}", self.session_id, line);
                        let reply = self.process_line(&line);
                        self.framed.send(reply).await?;
                    }
                    Some(Err(e)) => {
                        warn!("Session {} ({}): {}", self.session_id, self.origin, e);
                        // A broken transport cannot carry a reply.
                        if !matches!(e, BridgeError::Io(_)) {
                            let _ = self.framed.send(ReplyFrame::from(&e)).await;
                        }
                        if e.is_fatal() {
                            return Err(e);
                        }
                    }
                    None => {
                        debug!("Session {} ({}) reached end of input.", self.session_id, self.origin);
                        break;
                    }
                }
            }
        }

        info!(
            "Session {} ({}) finished: {} succeeded, {} failed",
            self.session_id, self.origin, self.session.succeeded, self.session.failed
        );
        Ok(())
    }

    /// Routes one request line and turns the outcome into a reply.
    fn process_line(&mut self, line: &str) -> ReplyFrame {
        if let Some(entry) = self.state.clients.get(&self.session_id) {
            entry.0.lock().touch();
        }

        let router = Router::new(&self.session.ctx);
        match router.dispatch(line) {
            Ok(reply) => {
                self.session.succeeded += 1;
                self.state.stats.increment_total_commands();
                reply
            }
            Err(e) => {
                self.session.failed += 1;
                self.state.stats.increment_failed_requests();
                if e.is_parse_error() {
                    debug!("Session {}: rejected '{}': {}", self.session_id, line, e);
                }
                ReplyFrame::from(&e)
            }
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }
}
