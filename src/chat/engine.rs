/// Matchmaking and relay engine.
///
/// Owns all mutable chat state: the insertion-ordered waiting list, the active
/// rooms, the participant -> room index, and the set of live connections. Every
/// operation runs to completion against that state and returns the outbound
/// events to deliver; delivery itself is the transport layer's problem.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use log::{info, debug};

use super::protocol::{ParticipantId, ServerWsMessage};
use super::room::Room;

/// One event addressed to one participant. Fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: ParticipantId,
    pub event: ServerWsMessage,
}

/// Main matchmaking engine. A participant is in at most one of the waiting
/// list and the room index at any instant.
pub struct ChatEngine {
    /// Participants seeking a partner, in arrival order.
    waiting: Vec<ParticipantId>,
    /// Active rooms by room id.
    rooms: HashMap<Uuid, Room>,
    /// Which room each paired participant belongs to.
    participant_rooms: HashMap<ParticipantId, Uuid>,
    /// Live connections, as reported by the transport layer.
    connected: HashSet<ParticipantId>,
}

impl ChatEngine {
    pub fn new() -> Self {
        Self {
            waiting: Vec::new(),
            rooms: HashMap::new(),
            participant_rooms: HashMap::new(),
            connected: HashSet::new(),
        }
    }

    /// Register a new connection and broadcast the updated user count.
    pub fn on_connect(&mut self, participant: ParticipantId) -> Vec<Outbound> {
        self.connected.insert(participant);
        info!("[Chat] Participant {participant} connected");
        self.user_count_broadcast()
    }

    /// Single cleanup path for any termination, graceful or not: dequeue,
    /// tear down the room if paired, then broadcast the updated user count.
    pub fn on_disconnect(&mut self, participant: ParticipantId) -> Vec<Outbound> {
        self.connected.remove(&participant);
        if let Some(pos) = self.waiting.iter().position(|id| *id == participant) {
            self.waiting.remove(pos);
        }

        let mut events = Vec::new();
        if let Some(room) = self.remove_room_of(participant) {
            if let Some(peer) = room.other_member(participant) {
                events.push(Outbound {
                    to: peer,
                    event: ServerWsMessage::PartnerDisconnected,
                });
            }
            info!("[Chat] Room {} deleted, participant {} disconnected", room.id, participant);
        }
        info!("[Chat] Participant {participant} disconnected");
        events.extend(self.user_count_broadcast());
        events
    }

    /// Pair the requester with the oldest valid waiting participant, or
    /// enqueue them. Strict FIFO among live candidates; stale entries
    /// (connection already gone) are pruned, never paired.
    pub fn find_partner(&mut self, participant: ParticipantId) -> Vec<Outbound> {
        if self.participant_rooms.contains_key(&participant) {
            debug!("[Chat] Participant {participant} requested a partner while already paired");
            return Vec::new();
        }

        let mut candidate = None;
        let mut i = 0;
        while i < self.waiting.len() {
            let id = self.waiting[i];
            if id == participant {
                i += 1;
                continue;
            }
            if !self.connected.contains(&id) {
                self.waiting.remove(i);
                debug!("[Chat] Pruned stale waiting entry {id}");
                continue;
            }
            self.waiting.remove(i);
            candidate = Some(id);
            break;
        }

        match candidate {
            Some(partner) => {
                let room = Room::new(participant, partner);
                let room_id = room.id;
                self.participant_rooms.insert(participant, room_id);
                self.participant_rooms.insert(partner, room_id);
                self.rooms.insert(room_id, room);
                info!("[Chat] Room {room_id} created with participants {participant} and {partner}");
                vec![
                    Outbound { to: participant, event: ServerWsMessage::PartnerFound { room_id } },
                    Outbound { to: partner, event: ServerWsMessage::PartnerFound { room_id } },
                ]
            }
            None => {
                if !self.waiting.contains(&participant) {
                    self.waiting.push(participant);
                    info!("[Chat] Participant {participant} added to waiting list");
                }
                vec![Outbound { to: participant, event: ServerWsMessage::Searching }]
            }
        }
    }

    /// Leave the waiting list. Confirmed only if a removal actually happened.
    pub fn cancel_search(&mut self, participant: ParticipantId) -> Vec<Outbound> {
        if let Some(pos) = self.waiting.iter().position(|id| *id == participant) {
            self.waiting.remove(pos);
            info!("[Chat] Participant {participant} cancelled search");
            vec![Outbound { to: participant, event: ServerWsMessage::SearchCancelled }]
        } else {
            Vec::new()
        }
    }

    /// Relay a text message to the sender's partner. Never echoed back to the
    /// sender; silently dropped if the sender is not in a room.
    pub fn relay_message(&mut self, participant: ParticipantId, text: String) -> Vec<Outbound> {
        let Some(room_id) = self.participant_rooms.get(&participant) else {
            debug!("[Chat] Dropped message from unpaired participant {participant}");
            return Vec::new();
        };
        let Some(room) = self.rooms.get(room_id) else {
            return Vec::new();
        };
        match room.other_member(participant) {
            Some(peer) => vec![Outbound {
                to: peer,
                event: ServerWsMessage::receive_message(text),
            }],
            None => Vec::new(),
        }
    }

    /// Close the requester's room. Only the other member is told; the
    /// initiator already knows.
    pub fn end_chat(&mut self, participant: ParticipantId) -> Vec<Outbound> {
        let Some(room) = self.remove_room_of(participant) else {
            debug!("[Chat] Participant {participant} ended a chat but is not in a room");
            return Vec::new();
        };
        info!("[Chat] Room {} deleted by participant {}", room.id, participant);
        match room.other_member(participant) {
            Some(peer) => vec![Outbound { to: peer, event: ServerWsMessage::ChatEnded }],
            None => Vec::new(),
        }
    }

    /// Number of live connections.
    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    /// Whether the participant is currently in the waiting list.
    pub fn is_waiting(&self, participant: ParticipantId) -> bool {
        self.waiting.contains(&participant)
    }

    /// Waiting participants in arrival order.
    pub fn waiting(&self) -> &[ParticipantId] {
        &self.waiting
    }

    /// Room id of the participant's current room, if paired.
    pub fn room_of(&self, participant: ParticipantId) -> Option<Uuid> {
        self.participant_rooms.get(&participant).copied()
    }

    /// Number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Destroy the participant's room, removing both members' index entries.
    /// Teardown is total: a room and its two index entries live and die together.
    fn remove_room_of(&mut self, participant: ParticipantId) -> Option<Room> {
        let room_id = self.participant_rooms.get(&participant).copied()?;
        let room = self.rooms.remove(&room_id)?;
        for member in room.users {
            self.participant_rooms.remove(&member);
        }
        Some(room)
    }

    fn user_count_broadcast(&self) -> Vec<Outbound> {
        let count = self.connected.len();
        self.connected
            .iter()
            .map(|&to| Outbound { to, event: ServerWsMessage::UserCount { count } })
            .collect()
    }

    /// Drop a connection from the live set without running disconnect
    /// cleanup, as if the transport's disconnect signal had been lost.
    #[cfg(test)]
    pub fn sever_connection(&mut self, participant: ParticipantId) {
        self.connected.remove(&participant);
    }

    /// Seed a waiting entry directly. `find_partner` pairs eagerly, so
    /// multi-waiter states cannot be arranged through it.
    #[cfg(test)]
    pub fn enqueue_waiting(&mut self, participant: ParticipantId) {
        if !self.waiting.contains(&participant) {
            self.waiting.push(participant);
        }
    }
}
