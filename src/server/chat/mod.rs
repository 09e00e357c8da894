/// Chat actor module: central chat server and per-connection sessions.

pub mod server;
pub mod session;
pub mod messages;
