//! Main entry point for the chat backend server.
//!
//! Initializes the actor system, configures application state, and launches
//! the HTTP server with the WebSocket endpoint for anonymous 1:1 chat.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::chat::server::ChatServer;

pub mod config;
mod chat;
mod server;
mod tests;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    // Start the ChatServer actor (matchmaking, relay, cleanup).
    let chat_addr = ChatServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(chat_addr));

    let bind = (config::server::bind_addr(), config::server::port());
    let cors_origin = config::server::cors_origin();
    info!("Server running on {}:{}", bind.0, bind.1);

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", cors_origin.clone()))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(bind)?
    .run()
    .await
}
