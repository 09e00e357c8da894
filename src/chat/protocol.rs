use chrono::Utc;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Opaque identifier for one live connection. Minted on connect, never reused.
pub type ParticipantId = Uuid;

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientWsMessage {
    FindPartner,
    CancelSearch,
    SendMessage { text: String },
    EndChat,
}

// Message serveur -> client
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerWsMessage {
    Searching,
    SearchCancelled,
    PartnerFound {
        #[serde(rename = "roomId")]
        room_id: Uuid,
    },
    ReceiveMessage {
        id: Uuid,
        text: String,
        timestamp: String,
        sender: String,
    },
    ChatEnded,
    PartnerDisconnected,
    UserCount {
        count: usize,
    },
}

impl ServerWsMessage {
    /// Build a relayed message: fresh id, server timestamp, text untouched.
    pub fn receive_message(text: String) -> Self {
        Self::ReceiveMessage {
            id: Uuid::new_v4(),
            text,
            timestamp: Utc::now().to_rfc3339(),
            sender: "stranger".to_string(),
        }
    }
}
