/// Main configuration module.
///
/// Re-exports the server deployment configuration.
pub mod server;
