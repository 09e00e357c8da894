/// Chat domain module: matchmaking engine, room lifecycle, and wire protocol.

pub mod engine;
pub mod protocol;
pub mod room;
