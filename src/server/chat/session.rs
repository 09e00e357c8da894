/// WebSocket session handler for one anonymous participant.
///
/// This actor manages a single connection, registering it with the chat server
/// on start and deregistering it on stop (the one cleanup path, reached from
/// graceful closes and dropped connections alike). Incoming text frames are
/// parsed into commands and forwarded; engine events are serialized back out.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use uuid::Uuid;
use log::warn;

use crate::chat::protocol::{ClientWsMessage, ParticipantId};
use super::messages::{ClientCommand, Connect, Disconnect, OutboundEvent};
use super::server::ChatServer;

/// Represents one participant's WebSocket session.
pub struct ChatSession {
    pub participant_id: ParticipantId,
    pub chat_addr: Addr<ChatServer>,
}

impl Actor for ChatSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the connection with the chat server.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.chat_addr.do_send(Connect {
            participant_id: self.participant_id,
            addr: ctx.address(),
        });
    }

    /// Called when the session stops. Deregisters the connection.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.chat_addr.do_send(Disconnect {
            participant_id: self.participant_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChatSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                // Parse the frame as a command; anything outside the schema is
                // rejected here and never reaches the engine.
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(msg) => {
                        self.chat_addr.do_send(ClientCommand {
                            participant_id: self.participant_id,
                            msg,
                        });
                    }
                    Err(e) => {
                        warn!("[Chat] Ignored invalid frame from {}: {e}", self.participant_id);
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<OutboundEvent> for ChatSession {
    type Result = ();

    /// Handles events sent from the chat server to this session.
    fn handle(&mut self, msg: OutboundEvent, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg.0) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: close the connection.
                warn!("[Chat] Failed to serialize event for {}: {e}", self.participant_id);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for the chat service.
///
/// Each connection gets a fresh opaque participant id; there are no query
/// parameters and no identity beyond the connection itself.
pub async fn ws_chat(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let participant_id = Uuid::new_v4();

    ws::start(
        ChatSession {
            participant_id,
            chat_addr: data.chat_addr.clone(),
        },
        &req,
        stream,
    )
}
