// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Chat actors (central matchmaking server and per-connection sessions)

pub mod state;
pub mod router;
pub mod chat;
