use actix::prelude::*;

use crate::chat::protocol::{ClientWsMessage, ParticipantId, ServerWsMessage};
use super::session::ChatSession;

/// Message: a new connection registered with the transport.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub participant_id: ParticipantId,
    pub addr: Addr<ChatSession>,
}

/// Message: a connection went away, gracefully or not.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub participant_id: ParticipantId,
}

/// Message: a parsed command from a connected participant.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ClientCommand {
    pub participant_id: ParticipantId,
    pub msg: ClientWsMessage,
}

/// Message: one outbound event for delivery to a session's peer socket.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct OutboundEvent(pub ServerWsMessage);
