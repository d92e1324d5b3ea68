// src/connection/mod.rs

//! Manages the lifecycle of a single front-end session: reading request lines,
//! routing them, and releasing the session's resources when it ends.

mod guard;
mod handler;
mod session;

pub use guard::ConnectionGuard;
pub use handler::ConnectionHandler;
pub use session::SessionState;
