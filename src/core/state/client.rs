// src/core/state/client.rs

//! Contains state definitions related to front-end sessions.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ClientStateTuple = (Arc<Mutex<ClientInfo>>, ShutdownSender);
pub type ClientMap = Arc<DashMap<u64, ClientStateTuple>>;

/// Where a session's commands come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOrigin {
    Tcp(std::net::SocketAddr),
    Stdio,
}

impl std::fmt::Display for ClientOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientOrigin::Tcp(addr) => write!(f, "{addr}"),
            ClientOrigin::Stdio => f.write_str("stdio"),
        }
    }
}

#[derive(Debug)]
pub struct ClientInfo {
    pub origin: ClientOrigin,
    pub session_id: u64,
    pub created: Instant,
    pub last_command_time: Instant,
    pub commands_processed: u64,
}

impl ClientInfo {
    pub fn new(origin: ClientOrigin, session_id: u64) -> Self {
        let now = Instant::now();
        Self {
            origin,
            session_id,
            created: now,
            last_command_time: now,
            commands_processed: 0,
        }
    }

    /// Records that the session just sent a command.
    pub fn touch(&mut self) {
        self.last_command_time = Instant::now();
        self.commands_processed += 1;
    }
}
