/// Chat server actor.
///
/// Hosts the matchmaking engine and the registry of live session actors. All
/// engine operations run on this single actor, so state transitions never
/// interleave; events returned by the engine are delivered fire-and-forget.

use actix::prelude::*;
use std::collections::HashMap;
use log::debug;

use crate::chat::engine::{ChatEngine, Outbound};
use crate::chat::protocol::{ClientWsMessage, ParticipantId};
use super::messages::{ClientCommand, Connect, Disconnect, OutboundEvent};
use super::session::ChatSession;

type SessionAddr = Addr<ChatSession>;

/// Main chat server actor.
pub struct ChatServer {
    /// Matchmaking and relay state machine.
    engine: ChatEngine,
    /// Live session actors by participant id.
    sessions: HashMap<ParticipantId, SessionAddr>,
}

impl ChatServer {
    /// Create a new chat server.
    pub fn new() -> Self {
        Self {
            engine: ChatEngine::new(),
            sessions: HashMap::new(),
        }
    }

    /// Deliver engine-emitted events to their recipients. No acknowledgment,
    /// no retry; events for participants without a live session are dropped.
    fn dispatch(&self, events: Vec<Outbound>) {
        for Outbound { to, event } in events {
            match self.sessions.get(&to) {
                Some(addr) => addr.do_send(OutboundEvent(event)),
                None => debug!("[Chat] Dropped event for unknown participant {to}"),
            }
        }
    }
}

impl Actor for ChatServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for ChatServer {
    type Result = ();

    /// Registers a new connection and broadcasts the updated user count.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.insert(msg.participant_id, msg.addr);
        let events = self.engine.on_connect(msg.participant_id);
        self.dispatch(events);
    }
}

impl Handler<Disconnect> for ChatServer {
    type Result = ();

    /// Runs the cleanup path for a lost connection: dequeue, room teardown,
    /// partner notification, user count broadcast.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.remove(&msg.participant_id);
        let events = self.engine.on_disconnect(msg.participant_id);
        self.dispatch(events);
    }
}

impl Handler<ClientCommand> for ChatServer {
    type Result = ();

    /// Routes a parsed client command to the corresponding engine operation.
    fn handle(&mut self, msg: ClientCommand, _ctx: &mut Self::Context) -> Self::Result {
        let events = match msg.msg {
            ClientWsMessage::FindPartner => self.engine.find_partner(msg.participant_id),
            ClientWsMessage::CancelSearch => self.engine.cancel_search(msg.participant_id),
            ClientWsMessage::SendMessage { text } => {
                self.engine.relay_message(msg.participant_id, text)
            }
            ClientWsMessage::EndChat => self.engine.end_chat(msg.participant_id),
        };
        self.dispatch(events);
    }
}
