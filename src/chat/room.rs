use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::protocol::ParticipantId;

/// One active paired conversation. Exactly two distinct members for its
/// entire lifetime; termination destroys the whole room.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: Uuid,
    pub users: [ParticipantId; 2],
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(a: ParticipantId, b: ParticipantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            users: [a, b],
            created_at: Utc::now(),
        }
    }

    /// The member that is not `participant`, or None if `participant` is not a member.
    pub fn other_member(&self, participant: ParticipantId) -> Option<ParticipantId> {
        if self.users[0] == participant {
            Some(self.users[1])
        } else if self.users[1] == participant {
            Some(self.users[0])
        } else {
            None
        }
    }
}
