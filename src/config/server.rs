/// Server deployment configuration.
///
/// Listen address, port, and permitted CORS origin. None of these affect chat
/// behavior; each can be overridden with an environment variable.
use std::env;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default permitted origin for browser clients.
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// Listen address, from `BIND_ADDR` if set.
pub fn bind_addr() -> String {
    env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Listen port, from `PORT` if set and parseable.
pub fn port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Permitted CORS origin, from `CORS_ORIGIN` if set.
pub fn cors_origin() -> String {
    env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string())
}
