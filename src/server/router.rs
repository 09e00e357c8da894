//! HTTP and WebSocket routing configuration.

use actix_web::web;
use crate::server::chat::session::ws_chat;

/// Configure the application's HTTP/WebSocket routes.
///
/// The single `/ws` endpoint is handled by a dedicated WebSocket actor, which
/// manages the connection lifecycle and forwards commands to the chat server.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws")
            .to(ws_chat)
    );
}
